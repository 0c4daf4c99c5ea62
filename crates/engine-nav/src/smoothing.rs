//! Post-processing applied to A* results.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GridPos, NavGraph};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Smoothing {
    #[default]
    None,
    /// Drop waypoints in the middle of straight runs; keep endpoints and turn vertices.
    Simple,
    /// Greedy shortcutting: skip waypoints while the straight grid line stays walkable.
    LineOfSight,
}

impl Smoothing {
    pub fn apply<G: NavGraph + ?Sized>(self, graph: &G, points: Vec<GridPos>) -> Vec<GridPos> {
        match self {
            Smoothing::None => points,
            Smoothing::Simple => simplify(&points),
            Smoothing::LineOfSight => shortcut(graph, &points),
        }
    }
}

fn gcd(mut a: i32, mut b: i32) -> i32 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Direction of `b - a` reduced to its primitive step, so colinear segments of different
/// lengths compare equal.
fn step_dir(a: GridPos, b: GridPos) -> (i32, i32) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let g = gcd(dx, dy);
    if g == 0 {
        (0, 0)
    } else {
        (dx / g, dy / g)
    }
}

/// Collapses runs of colinear segments. Idempotent.
pub fn simplify(points: &[GridPos]) -> Vec<GridPos> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    let mut dir = step_dir(points[0], points[1]);
    for w in points.windows(2).skip(1) {
        let d = step_dir(w[0], w[1]);
        if d != dir {
            out.push(w[0]);
            dir = d;
        }
    }
    out.push(points[points.len() - 1]);
    out
}

/// Keeps a waypoint only when the next point is not visible from the last kept one.
pub fn shortcut<G: NavGraph + ?Sized>(graph: &G, points: &[GridPos]) -> Vec<GridPos> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    let mut anchor = points[0];
    out.push(anchor);
    for i in 1..points.len() - 1 {
        if !line_walkable(graph, anchor, points[i + 1]) {
            anchor = points[i];
            out.push(anchor);
        }
    }
    out.push(points[points.len() - 1]);
    out
}

/// Bresenham walk from `a` to `b`; every visited cell must be walkable. Diagonal steps obey the
/// graph's corner-cutting rule.
pub fn line_walkable<G: NavGraph + ?Sized>(graph: &G, a: GridPos, b: GridPos) -> bool {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);

    loop {
        if !graph.is_walkable(x, y) {
            return false;
        }
        if x == b.x && y == b.y {
            return true;
        }
        let e2 = 2 * err;
        let step_x = e2 >= dy;
        let step_y = e2 <= dx;
        if step_x
            && step_y
            && !graph.cut_corners()
            && !(graph.is_walkable(x + sx, y) && graph.is_walkable(x, y + sy))
        {
            return false;
        }
        if step_x {
            err += dy;
            x += sx;
        }
        if step_y {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<GridPos> {
        raw.iter().copied().map(GridPos::from).collect()
    }

    #[test]
    fn step_dir_reduces_by_gcd() {
        assert_eq!(step_dir(GridPos::new(0, 0), GridPos::new(4, 2)), (2, 1));
        assert_eq!(step_dir(GridPos::new(0, 0), GridPos::new(-3, 0)), (-1, 0));
        assert_eq!(step_dir(GridPos::new(1, 1), GridPos::new(1, 1)), (0, 0));
    }

    #[test]
    fn simplify_keeps_turns_only() {
        let p = pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (3, 3)]);
        assert_eq!(simplify(&p), pts(&[(0, 0), (2, 0), (2, 2), (3, 3)]));
    }

    #[test]
    fn simplify_short_paths_unchanged() {
        let p = pts(&[(0, 0), (5, 5)]);
        assert_eq!(simplify(&p), p);
        assert!(simplify(&[]).is_empty());
    }
}
