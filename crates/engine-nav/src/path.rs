#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Result of a successful search: waypoints in start → goal order plus the accumulated cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPath {
    pub points: Vec<GridPos>,
    /// `g` cost of the goal node. Smoothing never changes it.
    pub total_cost: f32,
}

impl GridPath {
    pub fn new(points: Vec<GridPos>, total_cost: f32) -> Self {
        Self { points, total_cost }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<GridPos> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<GridPos> {
        self.points.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.points.iter().copied()
    }
}
