use crate::error::PathError;
use crate::frontier::Frontier;
use crate::node::NodeId;
use crate::traits::{Grid, Pathfinder, Strategy};

/// Outcome of a single search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepStatus {
    /// The frontier still holds nodes; call `step` again.
    Continue,
    /// The goal was expanded and the path reconstructed.
    Found,
    /// The frontier ran dry: the goal is unreachable.
    Exhausted,
}

/// Per-node classification exposed to renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    #[default]
    Unvisited,
    /// Discovered, waiting in the frontier.
    Frontier,
    /// Expanded.
    Visited,
    /// On the final start-to-goal path.
    Path,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Bookkeeping shared by every strategy: classification, parent links,
/// visitation order and the final path.
///
/// All vectors are indexed by node id and sized to the grid the search was
/// started on.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) status: Option<StepStatus>,
    pub(crate) start: Option<NodeId>,
    pub(crate) goal: Option<NodeId>,
    pub(crate) generation: u64,
    pub(crate) states: Vec<NodeState>,
    pub(crate) parent: Vec<Option<NodeId>>,
    pub(crate) visit_order: Vec<NodeId>,
    pub(crate) path: Vec<NodeId>,
    pub(crate) frontier_len: usize,
    pub(crate) peak_frontier: usize,
}

impl SearchState {
    /// Status of the last start/step call, `None` if no search was started.
    #[inline]
    pub fn status(&self) -> Option<StepStatus> {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Some(StepStatus::Continue)
    }

    #[inline]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// Generation of the grid the search was started on.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this state still describes `grid`'s current node ids.
    #[inline]
    pub fn is_current(&self, grid: &dyn Grid) -> bool {
        self.status.is_some()
            && self.generation == grid.generation()
            && self.states.len() == grid.len()
    }

    /// Raw classification of `id` in the last run.
    #[inline]
    pub fn node_state(&self, id: NodeId) -> NodeState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Classification of `id` as a renderer should draw it on `grid`: once
    /// the grid has been regenerated every node reads as unvisited.
    pub fn classify(&self, grid: &dyn Grid, id: NodeId) -> NodeState {
        if self.is_current(grid) {
            self.node_state(id)
        } else {
            NodeState::Unvisited
        }
    }

    /// Whether `id` has been expanded.
    #[inline]
    pub fn is_visited(&self, id: NodeId) -> bool {
        matches!(self.node_state(id), NodeState::Visited | NodeState::Path)
    }

    /// The node `id` was discovered from. `None` for the start node and for
    /// undiscovered nodes.
    #[inline]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied().flatten()
    }

    /// Expanded node ids, in expansion order.
    #[inline]
    pub fn visit_order(&self) -> &[NodeId] {
        &self.visit_order
    }

    /// Number of expansions performed so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.visit_order.len()
    }

    /// Start-to-goal path; empty unless the search succeeded.
    #[inline]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Number of entries currently waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    /// Largest frontier size seen during the run.
    #[inline]
    pub fn peak_frontier(&self) -> usize {
        self.peak_frontier
    }

    /// Ids currently classified as frontier, in id order.
    pub fn frontier_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == NodeState::Frontier)
            .map(|(id, _)| id)
    }

    /// Whether the directed traversal `from → to` is a step of the final path.
    pub fn is_path_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.path.windows(2).any(|w| w[0] == from && w[1] == to)
    }

    /// Sum of edge costs along the final path, `None` if there is no path or
    /// a step is not an edge of `grid`.
    pub fn path_cost(&self, grid: &dyn Grid) -> Option<f32> {
        if self.path.is_empty() {
            return None;
        }
        self.path.windows(2).try_fold(0.0, |acc, w| {
            let cost = grid.node(w[0]).ok()?.cost_to(w[1])?;
            Some(acc + cost)
        })
    }

    fn reset(&mut self, len: usize, generation: u64) {
        self.status = None;
        self.start = None;
        self.goal = None;
        self.generation = generation;
        self.states.clear();
        self.states.resize(len, NodeState::Unvisited);
        self.parent.clear();
        self.parent.resize(len, None);
        self.visit_order.clear();
        self.path.clear();
        self.frontier_len = 0;
        self.peak_frontier = 0;
    }

    fn discover(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.states[id] = NodeState::Frontier;
        self.parent[id] = parent;
    }

    fn expand(&mut self, id: NodeId) {
        self.states[id] = NodeState::Visited;
        self.visit_order.push(id);
    }

    /// Walk parent links back from `goal` to the start.
    pub(crate) fn reconstruct(&self, goal: NodeId) -> Result<Vec<NodeId>, PathError> {
        let broken = PathError::BrokenParentChain { goal };
        let start = self.start.ok_or_else(|| broken.clone())?;

        let mut path = vec![goal];
        let mut cur = goal;
        while cur != start {
            // A chain longer than the node count means a cycle.
            let next = match self.parent_of(cur) {
                Some(p) if path.len() <= self.parent.len() => p,
                _ => {
                    log::error!("parent chain from {goal} broke at node {cur}");
                    return Err(broken);
                }
            };
            path.push(next);
            cur = next;
        }
        path.reverse();
        Ok(path)
    }

    fn finish(&mut self, path: Vec<NodeId>) {
        for &id in &path {
            self.states[id] = NodeState::Path;
        }
        self.path = path;
        self.status = Some(StepStatus::Found);
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Generic resumable search: the shared expansion loop, parameterised by a
/// [`Strategy`] that picks the frontier and ranks discovered nodes.
#[derive(Debug, Clone, Default)]
pub struct Search<S: Strategy> {
    strategy: S,
    frontier: S::Frontier,
    state: SearchState,
}

impl<S: Strategy> Search<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            frontier: S::Frontier::default(),
            state: SearchState::default(),
        }
    }

    #[inline]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn sync_frontier_len(&mut self) {
        self.state.frontier_len = self.frontier.len();
        self.state.peak_frontier = self.state.peak_frontier.max(self.state.frontier_len);
    }
}

impl<S: Strategy> Pathfinder for Search<S> {
    fn name(&self) -> &str {
        self.strategy.name()
    }

    fn start(
        &mut self,
        grid: &dyn Grid,
        start: NodeId,
        goal: NodeId,
    ) -> Result<StepStatus, PathError> {
        let start_node = grid.node(start)?;
        let goal_node = grid.node(goal)?;

        self.frontier.clear();
        self.state.reset(grid.len(), grid.generation());
        self.state.start = Some(start);
        self.state.goal = Some(goal);

        if start == goal {
            self.state.expand(start);
            self.state.finish(vec![start]);
            return Ok(StepStatus::Found);
        }

        self.state.discover(start, None);
        self.frontier
            .push(start, self.strategy.priority(start_node, goal_node));
        self.sync_frontier_len();
        self.state.status = Some(StepStatus::Continue);
        log::trace!("{}: search {start} -> {goal} started", self.strategy.name());
        Ok(StepStatus::Continue)
    }

    fn step(&mut self, grid: &dyn Grid) -> Result<StepStatus, PathError> {
        let status = self.state.status.ok_or(PathError::NotStarted)?;
        if status != StepStatus::Continue {
            return Ok(status);
        }
        if !self.state.is_current(grid) {
            return Err(PathError::StaleGrid {
                expected: self.state.generation,
                found: grid.generation(),
            });
        }
        let goal = self.state.goal.ok_or(PathError::NotStarted)?;
        let goal_node = grid.node(goal)?;

        loop {
            let Some(current) = self.frontier.pop() else {
                self.sync_frontier_len();
                self.state.status = Some(StepStatus::Exhausted);
                log::debug!(
                    "{}: goal {goal} unreachable after {} expansions",
                    self.strategy.name(),
                    self.state.expansions()
                );
                return Ok(StepStatus::Exhausted);
            };

            // Skip stale entries.
            if self.state.is_visited(current) {
                continue;
            }

            self.state.expand(current);
            log::trace!("{}: expanding {current}", self.strategy.name());

            if current == goal {
                self.sync_frontier_len();
                let path = self.state.reconstruct(goal)?;
                log::debug!(
                    "{}: found {} node path after {} expansions",
                    self.strategy.name(),
                    path.len(),
                    self.state.expansions()
                );
                self.state.finish(path);
                return Ok(StepStatus::Found);
            }

            for edge in grid.node(current)?.neighbors() {
                let next = grid.node(edge.to)?;
                if self.state.node_state(edge.to) != NodeState::Unvisited {
                    continue;
                }
                self.state.discover(edge.to, Some(current));
                self.frontier
                    .push(edge.to, self.strategy.priority(next, goal_node));
            }

            self.sync_frontier_len();
            return Ok(StepStatus::Continue);
        }
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.state = SearchState::default();
    }

    fn state(&self) -> &SearchState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::Bfs;
    use crate::error::GridError;
    use crate::node::Node;
    use crate::square::SquareGrid;
    use gridpath_core::Rect;

    fn grid(columns: usize, rows: usize) -> SquareGrid {
        SquareGrid::with_tiles(
            Rect::from_size(columns as f32 * 10.0, rows as f32 * 10.0),
            columns,
            rows,
        )
        .unwrap()
    }

    #[test]
    fn step_before_start_fails() {
        let g = grid(3, 3);
        let mut bfs = Bfs::default();
        assert_eq!(bfs.step(&g), Err(PathError::NotStarted));
        assert_eq!(bfs.state().status(), None);
    }

    #[test]
    fn invalid_ids_leave_state_untouched() {
        let g = grid(3, 3);
        let mut bfs = Bfs::default();
        bfs.find_path(&g, 0, 8).unwrap();
        let before = bfs.state().visit_order().to_vec();

        assert_eq!(
            bfs.find_path(&g, 0, 9),
            Err(PathError::Grid(GridError::UnknownNode(9)))
        );
        assert_eq!(
            bfs.start(&g, 42, 0),
            Err(PathError::Grid(GridError::UnknownNode(42)))
        );
        assert_eq!(bfs.state().visit_order(), before.as_slice());
        assert_eq!(bfs.state().path(), &[0, 1, 2, 5, 8]);
    }

    #[test]
    fn step_mode_matches_run_to_completion() {
        let g = grid(6, 4);
        let mut full = Bfs::default();
        let path = full.find_path(&g, 7, 22).unwrap().unwrap();

        let mut stepped = Bfs::default();
        let mut status = stepped.start(&g, 7, 22).unwrap();
        let mut steps = 0;
        while status == StepStatus::Continue {
            status = stepped.step(&g).unwrap();
            steps += 1;
        }
        assert_eq!(status, StepStatus::Found);
        assert_eq!(stepped.state().path(), path.as_slice());
        assert_eq!(stepped.state().visit_order(), full.state().visit_order());
        assert_eq!(steps, stepped.state().expansions());
    }

    #[test]
    fn each_step_expands_exactly_one_node() {
        let g = grid(4, 4);
        let mut bfs = Bfs::default();
        bfs.start(&g, 0, 15).unwrap();
        for n in 1..=3 {
            bfs.step(&g).unwrap();
            assert_eq!(bfs.state().expansions(), n);
        }
    }

    #[test]
    fn finished_search_is_idempotent() {
        let g = grid(3, 3);
        let mut bfs = Bfs::default();
        bfs.find_path(&g, 0, 4).unwrap();
        let visits = bfs.state().expansions();
        assert_eq!(bfs.step(&g), Ok(StepStatus::Found));
        assert_eq!(bfs.state().expansions(), visits);
    }

    #[test]
    fn classification_during_a_run() {
        let g = grid(3, 3);
        let mut bfs = Bfs::default();
        bfs.start(&g, 4, 0).unwrap();
        assert_eq!(bfs.state().node_state(4), NodeState::Frontier);
        bfs.step(&g).unwrap();
        assert_eq!(bfs.state().node_state(4), NodeState::Visited);
        let frontier: Vec<_> = bfs.state().frontier_nodes().collect();
        assert_eq!(frontier, vec![1, 3, 5, 7]);
        assert_eq!(bfs.state().frontier_len(), 4);
        for id in frontier {
            assert_eq!(bfs.state().parent_of(id), Some(4));
        }
        assert_eq!(bfs.state().parent_of(4), None);
        assert_eq!(bfs.state().node_state(0), NodeState::Unvisited);
    }

    #[test]
    fn path_queries_after_success() {
        let g = grid(3, 1);
        let mut bfs = Bfs::default();
        assert_eq!(bfs.find_path(&g, 0, 2).unwrap(), Some(vec![0, 1, 2]));
        let s = bfs.state();
        assert_eq!(s.node_state(1), NodeState::Path);
        assert!(s.is_path_edge(0, 1));
        assert!(s.is_path_edge(1, 2));
        assert!(!s.is_path_edge(1, 0));
        assert!(!s.is_path_edge(0, 2));
        assert_eq!(s.path_cost(&g), Some(20.0));
    }

    #[test]
    fn stale_grid_is_rejected_and_classification_cleared() {
        let mut g = grid(5, 5);
        let mut bfs = Bfs::default();
        bfs.start(&g, 0, 24).unwrap();
        bfs.step(&g).unwrap();
        assert!(bfs.state().is_current(&g));
        assert_eq!(bfs.state().classify(&g, 0), NodeState::Visited);

        assert!(g.resize(Rect::from_size(120.0, 60.0)).unwrap());
        assert!(matches!(bfs.step(&g), Err(PathError::StaleGrid { .. })));
        assert!(!bfs.state().is_current(&g));
        assert!((0..g.len()).all(|id| bfs.state().classify(&g, id) == NodeState::Unvisited));
    }

    /// Reports a fixed generation, like a grid type with a per-instance
    /// counter.
    struct FixedGeneration(SquareGrid);

    impl Grid for FixedGeneration {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn bounds(&self) -> Rect {
            self.0.bounds()
        }

        fn generation(&self) -> u64 {
            1
        }

        fn nodes(&self) -> &[Node] {
            self.0.nodes()
        }

        fn resize(&mut self, bounds: Rect) -> Result<bool, GridError> {
            self.0.resize(bounds)
        }
    }

    #[test]
    fn stepping_on_another_grid_is_rejected() {
        let small = grid(3, 3);
        let large = grid(9, 9);
        let mut bfs = Bfs::default();
        bfs.start(&small, 4, 8).unwrap();
        assert!(matches!(bfs.step(&large), Err(PathError::StaleGrid { .. })));
        assert_eq!(bfs.state().expansions(), 0);
        assert_eq!(bfs.step(&small), Ok(StepStatus::Continue));
    }

    #[test]
    fn node_count_mismatch_is_rejected_with_equal_generations() {
        let small = FixedGeneration(grid(3, 3));
        let large = FixedGeneration(grid(9, 9));
        let mut bfs = Bfs::default();
        bfs.start(&small, 4, 8).unwrap();
        assert_eq!(
            bfs.step(&large),
            Err(PathError::StaleGrid {
                expected: 1,
                found: 1
            })
        );
        assert_eq!(bfs.state().classify(&large, 4), NodeState::Unvisited);
        assert_eq!(bfs.state().classify(&small, 4), NodeState::Frontier);
        assert_eq!(bfs.find_path(&small, 4, 8).unwrap(), Some(vec![4, 5, 8]));
    }

    #[test]
    fn reset_clears_everything() {
        let g = grid(3, 3);
        let mut bfs = Bfs::default();
        bfs.find_path(&g, 0, 8).unwrap();
        bfs.reset();
        assert_eq!(bfs.state().status(), None);
        assert!(bfs.state().path().is_empty());
        assert_eq!(bfs.state().expansions(), 0);
        assert_eq!(bfs.state().node_state(0), NodeState::Unvisited);
        assert_eq!(bfs.step(&g), Err(PathError::NotStarted));
    }

    #[test]
    fn reconstruct_detects_broken_chains() {
        let mut state = SearchState::default();
        state.reset(4, 1);
        state.start = Some(0);
        state.parent[3] = Some(2);
        assert_eq!(
            state.reconstruct(3),
            Err(PathError::BrokenParentChain { goal: 3 })
        );

        // Cycle 2 <-> 3 never reaches 0.
        state.parent[2] = Some(3);
        assert_eq!(
            state.reconstruct(3),
            Err(PathError::BrokenParentChain { goal: 3 })
        );

        state.parent[2] = Some(1);
        state.parent[1] = Some(0);
        assert_eq!(state.reconstruct(3), Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn pathfinders_are_swappable() {
        use crate::best_first::BestFirstSearch;

        let g = grid(4, 4);
        let mut finders: Vec<Box<dyn Pathfinder>> = vec![
            Box::new(Bfs::default()),
            Box::new(BestFirstSearch::default()),
        ];
        for pf in finders.iter_mut() {
            let path = pf.find_path(&g, 0, 15).unwrap().unwrap();
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&15));
        }
        assert_eq!(finders[0].name(), "BFS");
        assert_eq!(finders[1].name(), "Best-First Search");
    }
}
