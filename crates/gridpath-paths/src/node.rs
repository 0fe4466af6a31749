use gridpath_core::Vec2;

/// Dense, zero-based node handle. Stable until the owning grid regenerates.
pub type NodeId = usize;

/// A weighted link to an adjacent node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: NodeId,
    pub cost: f32,
}

/// A graph vertex: an id, a fixed position and an ordered neighbor list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    position: Vec2,
    neighbors: Vec<Edge>,
}

impl Node {
    pub fn new(id: NodeId, position: Vec2) -> Self {
        Self {
            id,
            position,
            neighbors: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Neighbors in the order the grid discovered them.
    #[inline]
    pub fn neighbors(&self) -> &[Edge] {
        &self.neighbors
    }

    /// Cost of the edge to `to`, if the two nodes are linked.
    pub fn cost_to(&self, to: NodeId) -> Option<f32> {
        self.neighbors.iter().find(|e| e.to == to).map(|e| e.cost)
    }

    #[inline]
    pub fn is_neighbor(&self, to: NodeId) -> bool {
        self.cost_to(to).is_some()
    }

    /// Append an edge. Self-loops, duplicates and non-positive costs are
    /// ignored; returns whether the edge was added.
    pub(crate) fn add_neighbor(&mut self, to: NodeId, cost: f32) -> bool {
        if to == self.id || cost.is_nan() || cost <= 0.0 || self.is_neighbor(to) {
            return false;
        }
        self.neighbors.push(Edge { to, cost });
        true
    }

    pub(crate) fn clear_neighbors(&mut self) {
        self.neighbors.clear();
    }
}
