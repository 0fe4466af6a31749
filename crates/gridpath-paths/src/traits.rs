use gridpath_core::Rect;

use crate::error::{GridError, PathError};
use crate::frontier::Frontier;
use crate::node::{Edge, Node, NodeId};
use crate::search::{SearchState, StepStatus};

/// A navigable node graph derived from a tiling of a bounding rectangle.
///
/// Nodes live in a dense arena: the node with id `i` is `nodes()[i]`.
pub trait Grid {
    /// Short name of the tiling scheme.
    fn name(&self) -> &str;

    /// The rectangle currently being tiled.
    fn bounds(&self) -> Rect;

    /// Counter that changes whenever node ids or edges may have changed.
    /// Distinct grids should not report the same value.
    fn generation(&self) -> u64;

    /// Every node of the current generation, indexed by id.
    fn nodes(&self) -> &[Node];

    /// React to a new bounding rectangle. Returns `Ok(true)` if the graph was
    /// regenerated, `Ok(false)` if the rectangle did not change. Degenerate
    /// rectangles are rejected and leave the grid untouched.
    fn resize(&mut self, bounds: Rect) -> Result<bool, GridError>;

    /// Look up a node by id.
    fn node(&self, id: NodeId) -> Result<&Node, GridError> {
        self.nodes().get(id).ok_or(GridError::UnknownNode(id))
    }

    /// Outgoing edges of `id`, in discovery order.
    fn neighbors(&self, id: NodeId) -> Result<&[Edge], GridError> {
        Ok(self.node(id)?.neighbors())
    }

    fn contains(&self, id: NodeId) -> bool {
        id < self.nodes().len()
    }

    fn len(&self) -> usize {
        self.nodes().len()
    }

    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }
}

/// Exploration order of a search: which frontier to use and how to rank a
/// freshly discovered node.
pub trait Strategy {
    type Frontier: Frontier + Default + Clone + std::fmt::Debug;

    fn name(&self) -> &'static str;

    /// Priority of `candidate` when it is enqueued; lower values are expanded
    /// first by priority frontiers and ignored by FIFO ones.
    fn priority(&self, candidate: &Node, goal: &Node) -> f32;
}

/// A resumable graph search bound to a grid by reference on every call.
///
/// A search is started with [`Pathfinder::start`] and advanced one expansion
/// at a time with [`Pathfinder::step`]; [`Pathfinder::find_path`] simply steps
/// until the search finishes, so both modes visit nodes in the same order.
pub trait Pathfinder {
    fn name(&self) -> &str;

    /// Validate `start` and `goal`, reset all run state and seed the frontier.
    ///
    /// Invalid ids fail before any run state is touched.
    fn start(
        &mut self,
        grid: &dyn Grid,
        start: NodeId,
        goal: NodeId,
    ) -> Result<StepStatus, PathError>;

    /// Perform exactly one node expansion. Calling `step` on a finished search
    /// returns its final status again.
    fn step(&mut self, grid: &dyn Grid) -> Result<StepStatus, PathError>;

    /// Abandon any run and clear all state.
    fn reset(&mut self);

    /// Read-only view of the run state, for renderers and tests.
    fn state(&self) -> &SearchState;

    /// Run a full search. Returns the start-to-goal path, or `None` if the goal
    /// is unreachable.
    fn find_path(
        &mut self,
        grid: &dyn Grid,
        start: NodeId,
        goal: NodeId,
    ) -> Result<Option<Vec<NodeId>>, PathError> {
        let mut status = self.start(grid, start, goal)?;
        while status == StepStatus::Continue {
            status = self.step(grid)?;
        }
        Ok(match status {
            StepStatus::Found => Some(self.state().path().to_vec()),
            _ => None,
        })
    }
}
