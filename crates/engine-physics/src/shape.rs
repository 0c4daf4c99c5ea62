#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Collision shape, centered on the body position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Box {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Shape {
    /// Full width/height of the axis-aligned bounds.
    pub fn bounds(&self) -> Vec2 {
        match *self {
            Shape::Box { width, height } => Vec2::new(width, height),
            Shape::Circle { radius } => Vec2::new(radius * 2.0, radius * 2.0),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.bounds() * 0.5
    }

    pub fn aabb_at(&self, center: Vec2) -> Aabb {
        Aabb::from_center(center, self.half_extents())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let h = half_extents.abs();
        Self {
            min: center - h,
            max: center + h,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Slab test for a ray `origin + dir * t`. Returns the entry parameter clamped to `t >= 0`
    /// (origins inside the box hit at `t = 0`), or `None` if the box lies outside `[0, max_t]`.
    pub fn ray_intersection(&self, origin: Vec2, dir: Vec2, max_t: f32) -> Option<f32> {
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
        ] {
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                core::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return None;
            }
        }

        if tmax < 0.0 {
            return None;
        }
        let t = tmin.max(0.0);
        (t <= max_t).then_some(t)
    }
}
