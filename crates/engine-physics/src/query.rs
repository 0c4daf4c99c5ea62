//! Read-only spatial queries over the bodies of a world.

use crate::{Aabb, BodyHandle, PhysicsWorld, StepHooks, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub body: BodyHandle,
    pub point: Vec2,
    /// Negated ray direction. This is an approximation, not the surface normal of the face
    /// that was hit.
    pub normal: Vec2,
    /// Distance from the ray start to `point`.
    pub distance: f32,
}

impl<H: StepHooks> PhysicsWorld<H> {
    /// Nearest body whose bounding box the segment `start..end` touches.
    pub fn raycast(&self, start: Vec2, end: Vec2) -> Option<RaycastHit> {
        let delta = end - start;
        let len = delta.length();
        if len <= f32::EPSILON {
            return None;
        }
        let dir = delta / len;

        let mut best: Option<(BodyHandle, f32)> = None;
        for (handle, body) in self.bodies().iter() {
            let Some(t) = body.aabb().ray_intersection(start, dir, len) else {
                continue;
            };
            match best {
                Some((_, best_t)) if best_t <= t => {}
                _ => best = Some((handle, t)),
            }
        }

        best.map(|(body, t)| RaycastHit {
            body,
            point: start + dir * t,
            normal: -dir,
            distance: t,
        })
    }

    /// Bodies whose bounding box overlaps the box spanned by `min` and `max`.
    pub fn query_aabb(&self, min: Vec2, max: Vec2) -> Vec<BodyHandle> {
        let area = Aabb::new(min, max);
        self.bodies()
            .iter()
            .filter(|(_, body)| body.aabb().overlaps(&area))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Bodies whose bounding box contains `point`.
    pub fn query_point(&self, point: Vec2) -> Vec<BodyHandle> {
        self.bodies()
            .iter()
            .filter(|(_, body)| body.aabb().contains_point(point))
            .map(|(handle, _)| handle)
            .collect()
    }
}
