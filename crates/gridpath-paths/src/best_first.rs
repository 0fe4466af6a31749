use crate::distance::Heuristic;
use crate::frontier::PriorityFrontier;
use crate::node::Node;
use crate::search::Search;
use crate::traits::Strategy;

/// Greedy best-first exploration: the discovered node that looks closest to
/// the goal is expanded next.
///
/// Only the order of expansion depends on the heuristic. Every reachable node
/// is still enqueued when first discovered, so a path is found whenever one
/// exists, though usually not the shortest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyBestFirst {
    pub heuristic: Heuristic,
}

impl Strategy for GreedyBestFirst {
    type Frontier = PriorityFrontier;

    fn name(&self) -> &'static str {
        "Best-First Search"
    }

    #[inline]
    fn priority(&self, candidate: &Node, goal: &Node) -> f32 {
        self.heuristic
            .estimate(candidate.position(), goal.position())
    }
}

/// Greedy best-first search pathfinder.
pub type BestFirstSearch = Search<GreedyBestFirst>;

impl Search<GreedyBestFirst> {
    /// Best-first search ranking nodes with `heuristic`.
    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self::new(GreedyBestFirst { heuristic })
    }
}
