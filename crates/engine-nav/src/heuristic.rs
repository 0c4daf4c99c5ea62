use core::f32::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GridPos;

/// Distance estimate used to order the A* open set.
///
/// `Octile` is consistent and admissible for 8-directional movement with diagonal cost √2.
/// `Manhattan` suits 4-directional grids, `Chebyshev` 8-directional grids with uniform
/// diagonal cost.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
    /// Caller-supplied estimate over `(x1, y1, x2, y2)`.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(i32, i32, i32, i32) -> f32),
}

impl Heuristic {
    pub fn estimate(self, from: GridPos, to: GridPos) -> f32 {
        match self {
            Self::Manhattan => manhattan(from.x, from.y, to.x, to.y),
            Self::Euclidean => euclidean(from.x, from.y, to.x, to.y),
            Self::Chebyshev => chebyshev(from.x, from.y, to.x, to.y),
            Self::Octile => octile(from.x, from.y, to.x, to.y),
            Self::Custom(f) => f(from.x, from.y, to.x, to.y),
        }
    }
}

fn deltas(x1: i32, y1: i32, x2: i32, y2: i32) -> (f32, f32) {
    ((x2 - x1).abs() as f32, (y2 - y1).abs() as f32)
}

pub fn manhattan(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let (dx, dy) = deltas(x1, y1, x2, y2);
    dx + dy
}

pub fn euclidean(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let (dx, dy) = deltas(x1, y1, x2, y2);
    (dx * dx + dy * dy).sqrt()
}

pub fn chebyshev(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let (dx, dy) = deltas(x1, y1, x2, y2);
    dx.max(dy)
}

pub fn octile(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let (dx, dy) = deltas(x1, y1, x2, y2);
    dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn formulas() {
        let a = GridPos::new(1, 2);
        let b = GridPos::new(4, 6);
        assert!(close(Heuristic::Manhattan.estimate(a, b), 7.0));
        assert!(close(Heuristic::Euclidean.estimate(a, b), 5.0));
        assert!(close(Heuristic::Chebyshev.estimate(a, b), 4.0));
        assert!(close(Heuristic::Octile.estimate(a, b), 4.0 + (SQRT_2 - 1.0) * 3.0));
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = GridPos::new(-3, 5);
        let b = GridPos::new(2, -1);
        for h in [
            Heuristic::Manhattan,
            Heuristic::Euclidean,
            Heuristic::Chebyshev,
            Heuristic::Octile,
        ] {
            assert!(close(h.estimate(a, b), h.estimate(b, a)));
            assert_eq!(h.estimate(a, a), 0.0);
        }
    }

    #[test]
    fn custom_is_called() {
        fn zero(_: i32, _: i32, _: i32, _: i32) -> f32 {
            0.0
        }
        let h = Heuristic::Custom(zero);
        assert_eq!(h.estimate(GridPos::new(0, 0), GridPos::new(9, 9)), 0.0);
    }
}
