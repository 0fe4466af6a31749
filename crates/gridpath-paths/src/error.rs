use std::fmt;

use crate::node::NodeId;

/// Errors raised while building or querying a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The id was not produced by the current generation of the grid.
    UnknownNode(NodeId),
    /// The bounding rectangle has a non-positive or non-finite extent.
    DegenerateBounds { width: f32, height: f32 },
    /// The requested tiling exceeds the grid's size limit.
    TooManyTiles { columns: usize, rows: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "grid has no node with id {id}"),
            Self::DegenerateBounds { width, height } => {
                write!(f, "cannot tile a {width}x{height} bounding rectangle")
            }
            Self::TooManyTiles { columns, rows } => {
                write!(f, "{columns}x{rows} tiles exceed the grid size limit")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors raised by a [`Pathfinder`](crate::Pathfinder).
///
/// An unreachable goal is not an error: searches report it as `Ok(None)` or
/// [`StepStatus::Exhausted`](crate::StepStatus::Exhausted).
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// A start or goal id was rejected by the grid.
    Grid(GridError),
    /// `step` was called before any search was started.
    NotStarted,
    /// The grid was regenerated or edited since the search started, or is
    /// not the grid the search started on.
    StaleGrid { expected: u64, found: u64 },
    /// Parent links from the goal never reached the start. This is a
    /// bookkeeping bug, not a property of the graph.
    BrokenParentChain { goal: NodeId },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid search argument: {e}"),
            Self::NotStarted => write!(f, "no search in progress"),
            Self::StaleGrid { expected, found } => write!(
                f,
                "grid changed during search (generation {expected}, now {found})"
            ),
            Self::BrokenParentChain { goal } => {
                write!(f, "parent links from node {goal} do not lead back to the start")
            }
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for PathError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
