use gridpath_core::Vec2;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (straight-line) distance between two positions.
#[inline]
pub fn euclidean(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Distance-to-goal estimate used to rank nodes in a priority frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    #[inline]
    pub fn estimate(self, from: Vec2, to: Vec2) -> f32 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => manhattan(from, to),
        }
    }
}
