//! Tiled node graphs and step-wise graph search for pathfinding visualizers.
//!
//! A [`Grid`] tiles a bounding rectangle into [`Node`]s linked by weighted
//! edges; a [`Pathfinder`] searches that graph from a start id to a goal id
//! either in one call ([`Pathfinder::find_path`]) or one expansion at a time
//! ([`Pathfinder::step`]) so a renderer can animate the search:
//!
//! - **BFS** ([`Bfs`]): FIFO frontier, fewest-edges paths
//! - **Greedy best-first** ([`BestFirstSearch`]): heuristic-ordered frontier,
//!   fast but not optimal
//!
//! Renderers never receive graphics state from this crate; they pull node
//! classifications ([`NodeState`]) and path edges from [`SearchState`] after
//! every step.
//!
//! # Trait overview
//!
//! | Trait | Role |
//! |---|---|
//! | [`Grid`] | node arena, lookup, neighbors, resize |
//! | [`Pathfinder`] | start / step / reset / find-path |
//! | [`Strategy`] | frontier choice and node ranking for [`Search`] |
//! | [`Frontier`] | FIFO or priority container of discovered nodes |

mod best_first;
mod bfs;
mod distance;
mod error;
mod frontier;
mod node;
mod search;
mod square;
mod traits;

pub use best_first::{BestFirstSearch, GreedyBestFirst};
pub use bfs::{Bfs, BreadthFirst};
pub use distance::{Heuristic, euclidean, manhattan};
pub use error::{GridError, PathError};
pub use frontier::{FifoFrontier, Frontier, PriorityFrontier};
pub use node::{Edge, Node, NodeId};
pub use search::{NodeState, Search, SearchState, StepStatus};
pub use square::{SquareGrid, SquareGridConfig, TileCoord, TileCount};
pub use traits::{Grid, Pathfinder, Strategy};
