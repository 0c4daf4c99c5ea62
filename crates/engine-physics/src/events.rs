//! Collision and trigger notifications.
//!
//! Listeners are plain closures invoked synchronously from inside
//! [`crate::PhysicsWorld::step`]; nothing is queued. For a physical (non-trigger) pair the
//! world-level [`CollisionInfo`] is delivered first, then the [`BodyCollision`] of body A, then
//! that of body B.

use core::fmt;

use crate::{BodyHandle, Vec2};

/// World-level report of one overlapping non-trigger pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Unit vector from A's position to B's position (`(1, 0)` when they coincide).
    pub normal: Vec2,
    /// Always `0.0`: overlaps are reported, not resolved.
    pub penetration_depth: f32,
    /// Midpoint of the two body positions.
    pub contact_point: Vec2,
}

/// Per-body report, delivered to the listeners registered on that body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCollision {
    /// The body receiving the notification.
    pub body: BodyHandle,
    pub other: BodyHandle,
    /// Unit vector from `body` towards `other`.
    pub normal: Vec2,
    /// Set when either body of the pair is a trigger.
    pub is_trigger: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    Enter,
    Exit,
}

/// A body started or stopped overlapping a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub phase: TriggerPhase,
    pub trigger: BodyHandle,
    pub other: BodyHandle,
}

/// Token returned on registration, used to unregister a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners for one event type.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn add(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(other, _)| *other != id);
        self.entries.len() != before
    }

    /// Calls every listener in registration order.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
