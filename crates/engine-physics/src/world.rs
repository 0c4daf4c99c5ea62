use std::collections::BTreeSet;

use crate::{
    BodyCollision, BodyHandle, BodySet, CollisionInfo, ListenerId, Listeners, PhysicsConfig,
    PhysicsError, RigidBody, TriggerEvent, TriggerPhase, Vec2,
};

/// Extension points run around every fixed sub-step. Both default to no-ops.
pub trait StepHooks {
    fn pre_step(&mut self, _bodies: &mut BodySet, _dt: f32) {}
    fn post_step(&mut self, _bodies: &mut BodySet, _dt: f32) {}
}

impl StepHooks for () {}

#[derive(Debug, Clone, Copy)]
struct Proxy {
    handle: BodyHandle,
    position: Vec2,
    half_extents: Vec2,
    dynamic: bool,
    trigger: bool,
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    a: BodyHandle,
    b: BodyHandle,
    normal: Vec2,
    contact_point: Vec2,
    /// `Some(trigger_body)` when either body is a trigger.
    trigger: Option<BodyHandle>,
}

/// Fixed-timestep simulation world.
///
/// [`PhysicsWorld::step`] accumulates wall-clock time and runs whole
/// [`PhysicsConfig::fixed_time_step`] sub-steps; the remainder carries over to the next call.
/// Each sub-step integrates dynamic bodies and then reports overlapping pairs. Overlaps are
/// only reported; bodies are never pushed apart.
#[derive(Debug)]
pub struct PhysicsWorld<H: StepHooks = ()> {
    config: PhysicsConfig,
    bodies: BodySet,
    hooks: H,
    paused: bool,
    accumulator: f32,
    total_substeps: u64,
    collision_listeners: Listeners<CollisionInfo>,
    trigger_listeners: Listeners<TriggerEvent>,
    /// `(trigger, other)` pairs overlapping after the last sub-step.
    active_triggers: BTreeSet<(BodyHandle, BodyHandle)>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::build(PhysicsConfig::default(), ())
    }

    pub fn try_new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        Self::with_hooks(config, ())
    }
}

impl<H: StepHooks> PhysicsWorld<H> {
    pub fn with_hooks(config: PhysicsConfig, hooks: H) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::build(config, hooks))
    }

    fn build(config: PhysicsConfig, hooks: H) -> Self {
        Self {
            config,
            bodies: BodySet::new(),
            hooks,
            paused: false,
            accumulator: 0.0,
            total_substeps: 0,
            collision_listeners: Listeners::default(),
            trigger_listeners: Listeners::default(),
            active_triggers: BTreeSet::new(),
        }
    }

    // --- Configuration -------------------------------------------------------

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn fixed_time_step(&self) -> f32 {
        self.config.fixed_time_step
    }

    pub fn set_fixed_time_step(&mut self, dt: f32) {
        assert!(dt > 0.0 && dt.is_finite(), "fixed time step must be positive");
        self.config.fixed_time_step = dt;
    }

    pub fn velocity_iterations(&self) -> u32 {
        self.config.velocity_iterations
    }

    pub fn set_velocity_iterations(&mut self, iterations: u32) {
        assert!(iterations > 0, "velocity iterations must be at least 1");
        self.config.velocity_iterations = iterations;
    }

    pub fn position_iterations(&self) -> u32 {
        self.config.position_iterations
    }

    pub fn set_position_iterations(&mut self, iterations: u32) {
        assert!(iterations > 0, "position iterations must be at least 1");
        self.config.position_iterations = iterations;
    }

    pub fn max_substeps_per_step(&self) -> u32 {
        self.config.max_substeps_per_step
    }

    pub fn set_max_substeps_per_step(&mut self, max: u32) {
        assert!(max > 0, "max sub-steps per step must be at least 1");
        self.config.max_substeps_per_step = max;
    }

    pub fn set_auto_sleep(&mut self, enabled: bool) {
        self.config.auto_sleep = enabled;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    // --- Bodies --------------------------------------------------------------

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        tracing::debug!(?handle, bodies = self.bodies.len(), "body added");
        handle
    }

    /// Hands the body back to the caller. Trigger overlaps involving it are forgotten without
    /// an exit event.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        self.active_triggers
            .retain(|(trigger, other)| *trigger != handle && *other != handle);
        tracing::debug!(?handle, bodies = self.bodies.len(), "body removed");
        Some(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodySet {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Removes every body and returns them.
    pub fn clear(&mut self) -> Vec<RigidBody> {
        self.active_triggers.clear();
        self.bodies.drain()
    }

    // --- Listeners -----------------------------------------------------------

    /// Called for every overlapping non-trigger pair, every sub-step.
    pub fn on_collision(&mut self, listener: impl FnMut(&CollisionInfo) + 'static) -> ListenerId {
        self.collision_listeners.add(listener)
    }

    pub fn remove_collision_listener(&mut self, id: ListenerId) -> bool {
        self.collision_listeners.remove(id)
    }

    /// Called when a body starts or stops overlapping a trigger.
    pub fn on_trigger(&mut self, listener: impl FnMut(&TriggerEvent) + 'static) -> ListenerId {
        self.trigger_listeners.add(listener)
    }

    pub fn remove_trigger_listener(&mut self, id: ListenerId) -> bool {
        self.trigger_listeners.remove(id)
    }

    // --- Stepping ------------------------------------------------------------

    /// Adds `delta_time` to the accumulator and runs as many whole fixed sub-steps as it
    /// holds, up to [`PhysicsConfig::max_substeps_per_step`]. Returns the number of sub-steps
    /// run (0 while paused).
    pub fn step(&mut self, delta_time: f32) -> usize {
        if self.paused {
            return 0;
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            tracing::warn!(delta_time, "ignoring invalid physics delta");
            return 0;
        }

        self.accumulator += delta_time;
        let dt = self.config.fixed_time_step;
        let max = self.config.max_substeps_per_step;
        let due = (self.accumulator / dt).floor();

        let substeps = if due > max as f32 {
            // Keep the fractional phase; the rest of the backlog is dropped.
            let dropped = self.accumulator - max as f32 * dt;
            self.accumulator = (self.accumulator % dt).max(0.0);
            tracing::warn!(due, max, dropped, "physics falling behind, dropping time");
            max
        } else {
            self.accumulator = (self.accumulator - due * dt).max(0.0);
            due as u32
        };

        for _ in 0..substeps {
            self.substep(dt);
        }
        substeps as usize
    }

    /// Unconsumed time carried to the next [`PhysicsWorld::step`].
    pub fn time_accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a fixed step left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> f32 {
        (self.accumulator / self.config.fixed_time_step).clamp(0.0, 1.0)
    }

    pub fn total_substeps(&self) -> u64 {
        self.total_substeps
    }

    fn substep(&mut self, dt: f32) {
        self.hooks.pre_step(&mut self.bodies, dt);

        let gravity = self.config.gravity;
        let auto_sleep = self.config.auto_sleep;
        let (sleep_velocity, sleep_time) = (
            self.config.sleep_velocity_threshold,
            self.config.sleep_time_threshold,
        );
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(gravity, dt);
            if auto_sleep {
                body.update_sleep(sleep_velocity, sleep_time, dt);
            }
        }

        let contacts = self.broad_phase();
        self.dispatch(&contacts);

        self.hooks.post_step(&mut self.bodies, dt);
        self.total_substeps += 1;
        tracing::trace!(
            substep = self.total_substeps,
            contacts = contacts.len(),
            "physics sub-step"
        );
    }

    /// O(n²) AABB overlap over all pairs with at least one dynamic body.
    fn broad_phase(&self) -> Vec<Contact> {
        let proxies: Vec<Proxy> = self
            .bodies
            .iter()
            .map(|(handle, body)| Proxy {
                handle,
                position: body.position(),
                half_extents: body.shape().half_extents(),
                dynamic: body.is_dynamic(),
                trigger: body.is_trigger(),
            })
            .collect();

        let mut contacts = Vec::new();
        for (i, a) in proxies.iter().enumerate() {
            for b in proxies.iter().skip(i + 1) {
                if !a.dynamic && !b.dynamic {
                    continue;
                }
                let delta = b.position - a.position;
                let reach = a.half_extents + b.half_extents;
                if delta.x.abs() > reach.x || delta.y.abs() > reach.y {
                    continue;
                }

                let trigger = if a.trigger {
                    Some(a.handle)
                } else if b.trigger {
                    Some(b.handle)
                } else {
                    None
                };
                contacts.push(Contact {
                    a: a.handle,
                    b: b.handle,
                    normal: delta.normalize_or(Vec2::X),
                    contact_point: (a.position + b.position) * 0.5,
                    trigger,
                });
            }
        }
        contacts
    }

    fn dispatch(&mut self, contacts: &[Contact]) {
        // Hooks may have removed bodies through the arena; forget their overlaps silently.
        let bodies = &self.bodies;
        self.active_triggers
            .retain(|(trigger, other)| bodies.contains(*trigger) && bodies.contains(*other));

        let mut touching = BTreeSet::new();

        for c in contacts {
            match c.trigger {
                Some(trigger) => {
                    let other = if trigger == c.a { c.b } else { c.a };
                    touching.insert((trigger, other));
                }
                None => {
                    let info = CollisionInfo {
                        body_a: c.a,
                        body_b: c.b,
                        normal: c.normal,
                        penetration_depth: 0.0,
                        contact_point: c.contact_point,
                    };
                    tracing::trace!(a = ?c.a, b = ?c.b, "collision");
                    self.collision_listeners.emit(&info);
                }
            }

            let is_trigger = c.trigger.is_some();
            if let Some(body) = self.bodies.get_mut(c.a) {
                body.emit_collision(&BodyCollision {
                    body: c.a,
                    other: c.b,
                    normal: c.normal,
                    is_trigger,
                });
            }
            if let Some(body) = self.bodies.get_mut(c.b) {
                body.emit_collision(&BodyCollision {
                    body: c.b,
                    other: c.a,
                    normal: -c.normal,
                    is_trigger,
                });
            }
        }

        let entered: Vec<_> = touching.difference(&self.active_triggers).copied().collect();
        let exited: Vec<_> = self.active_triggers.difference(&touching).copied().collect();
        for (trigger, other) in entered {
            self.trigger_listeners.emit(&TriggerEvent {
                phase: TriggerPhase::Enter,
                trigger,
                other,
            });
        }
        for (trigger, other) in exited {
            self.trigger_listeners.emit(&TriggerEvent {
                phase: TriggerPhase::Exit,
                trigger,
                other,
            });
        }
        self.active_triggers = touching;
    }
}
