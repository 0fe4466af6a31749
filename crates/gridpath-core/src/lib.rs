//! **gridpath-core** — geometry primitives for the gridpath visualizer.
//!
//! This crate provides the floating-point 2-D types shared by the graph
//! builders and the rendering collaborators: positions ([`Vec2`]), bounding
//! rectangles ([`Rect`]) and line segments ([`Segment`]).

pub mod geom;

pub use geom::{Rect, Segment, Vec2};
