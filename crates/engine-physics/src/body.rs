#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, BodyCollision, ListenerId, Listeners, Shape, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BodyType {
    /// Moved by integration; finite mass.
    #[default]
    Dynamic,
    /// Moved only by the caller; infinite mass.
    Kinematic,
    /// Never moves; infinite mass.
    Static,
}

/// How [`RigidBody::add_force`] interprets its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ForceMode {
    /// Accumulated, consumed by the next integration step.
    #[default]
    Force,
    /// Applied to velocity immediately, scaled by inverse mass.
    Impulse,
    /// Accumulated as `f * mass`; independent of mass.
    Acceleration,
    /// Applied to velocity immediately, ignoring mass.
    VelocityChange,
}

/// A 2D rigid body.
///
/// Bodies are created standalone and moved into a [`crate::PhysicsWorld`] with
/// [`crate::PhysicsWorld::add_body`]; removing them hands them back.
#[derive(Debug)]
pub struct RigidBody {
    body_type: BodyType,
    mass: f32,
    inv_mass: f32,
    restitution: f32,
    friction: f32,
    linear_damping: f32,
    angular_damping: f32,
    gravity_scale: f32,
    is_trigger: bool,
    can_sleep: bool,

    position: Vec2,
    rotation: f32,
    velocity: Vec2,
    angular_velocity: f32,

    force: Vec2,
    torque: f32,

    shape: Shape,

    sleeping: bool,
    sleep_time: f32,

    listeners: Listeners<BodyCollision>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(BodyType::Dynamic, Shape::default())
    }
}

impl RigidBody {
    pub fn new(body_type: BodyType, shape: Shape) -> Self {
        let mass = 1.0;
        Self {
            body_type,
            mass,
            inv_mass: if body_type == BodyType::Dynamic {
                1.0 / mass
            } else {
                0.0
            },
            restitution: 0.0,
            friction: 0.5,
            linear_damping: 0.0,
            angular_damping: 0.0,
            gravity_scale: 1.0,
            is_trigger: false,
            can_sleep: true,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            shape,
            sleeping: false,
            sleep_time: 0.0,
            listeners: Listeners::default(),
        }
    }

    pub fn dynamic(shape: Shape) -> Self {
        Self::new(BodyType::Dynamic, shape)
    }

    pub fn kinematic(shape: Shape) -> Self {
        Self::new(BodyType::Kinematic, shape)
    }

    pub fn fixed(shape: Shape) -> Self {
        Self::new(BodyType::Static, shape)
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.set_linear_damping(linear);
        self.set_angular_damping(angular);
        self
    }

    // --- Type and mass -------------------------------------------------------

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Non-dynamic bodies get infinite mass (`inv_mass == 0`); switching back to dynamic
    /// restores `1 / mass`. Pending forces are dropped when the body stops being dynamic.
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
        if body_type == BodyType::Dynamic {
            self.inv_mass = 1.0 / self.mass;
        } else {
            self.inv_mass = 0.0;
            self.clear_forces();
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        assert!(mass > 0.0 && mass.is_finite(), "mass must be positive and finite");
        self.mass = mass;
        if self.is_dynamic() {
            self.inv_mass = 1.0 / mass;
        }
    }

    // --- Material ------------------------------------------------------------

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        assert!((0.0..=1.0).contains(&restitution), "restitution must be in [0, 1]");
        self.restitution = restitution;
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f32) {
        assert!((0.0..=1.0).contains(&friction), "friction must be in [0, 1]");
        self.friction = friction;
    }

    pub fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    pub fn set_linear_damping(&mut self, damping: f32) {
        assert!((0.0..=1.0).contains(&damping), "linear damping must be in [0, 1]");
        self.linear_damping = damping;
    }

    pub fn angular_damping(&self) -> f32 {
        self.angular_damping
    }

    pub fn set_angular_damping(&mut self, damping: f32) {
        assert!((0.0..=1.0).contains(&damping), "angular damping must be in [0, 1]");
        self.angular_damping = damping;
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn set_gravity_scale(&mut self, gravity_scale: f32) {
        self.gravity_scale = gravity_scale;
    }

    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn aabb(&self) -> Aabb {
        self.shape.aabb_at(self.position)
    }

    // --- Transform and motion ------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleports the body and wakes it.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.wake_up();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.wake_up();
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
        self.wake_up();
    }

    /// Accumulated force (always in force units, whatever mode added it).
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn torque(&self) -> f32 {
        self.torque
    }

    // --- Forces --------------------------------------------------------------

    /// No-op unless the body is dynamic. Wakes the body.
    pub fn add_force(&mut self, force: Vec2, mode: ForceMode) {
        if !self.is_dynamic() {
            return;
        }
        match mode {
            ForceMode::Force => self.force += force,
            ForceMode::Impulse => self.velocity += force * self.inv_mass,
            ForceMode::Acceleration => self.force += force * self.mass,
            ForceMode::VelocityChange => self.velocity += force,
        }
        self.wake_up();
    }

    /// Linear part via [`RigidBody::add_force`], plus the torque of the lever arm from the body
    /// position to `point`.
    pub fn add_force_at_point(&mut self, force: Vec2, point: Vec2, mode: ForceMode) {
        self.add_force(force, mode);
        let arm = point - self.position;
        self.add_torque(arm.cross(force), mode);
    }

    /// `Force`/`Acceleration` accumulate; `Impulse`/`VelocityChange` change angular velocity
    /// directly. No-op unless the body is dynamic. Wakes the body.
    pub fn add_torque(&mut self, torque: f32, mode: ForceMode) {
        if !self.is_dynamic() {
            return;
        }
        match mode {
            ForceMode::Force => self.torque += torque,
            ForceMode::Acceleration => self.torque += torque * self.mass,
            ForceMode::Impulse | ForceMode::VelocityChange => self.angular_velocity += torque,
        }
        self.wake_up();
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    // --- Sleep ---------------------------------------------------------------

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Seconds spent below the sleep velocity threshold (driven by auto-sleep).
    pub fn sleep_time(&self) -> f32 {
        self.sleep_time
    }

    pub fn can_sleep(&self) -> bool {
        self.can_sleep
    }

    /// Opting out also wakes the body.
    pub fn set_can_sleep(&mut self, can_sleep: bool) {
        self.can_sleep = can_sleep;
        if !can_sleep {
            self.wake_up();
        }
    }

    pub fn sleep(&mut self) {
        self.sleeping = true;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    pub fn wake_up(&mut self) {
        self.sleeping = false;
        self.sleep_time = 0.0;
    }

    // --- Simulation (driven by the world) ------------------------------------

    /// One semi-implicit Euler step: velocity first, then position. Forces are cleared
    /// afterwards. Non-dynamic and sleeping bodies are left untouched.
    pub(crate) fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if !self.is_dynamic() || self.sleeping {
            return;
        }

        self.velocity += (gravity * self.gravity_scale + self.force * self.inv_mass) * dt;
        self.angular_velocity += self.torque * self.inv_mass * dt;

        self.velocity *= 1.0 - self.linear_damping;
        self.angular_velocity *= 1.0 - self.angular_damping;

        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        self.clear_forces();
    }

    /// Advances the rest timer and falls asleep once it passes `time_threshold`.
    pub(crate) fn update_sleep(&mut self, velocity_threshold: f32, time_threshold: f32, dt: f32) {
        if !self.is_dynamic() || self.sleeping || !self.can_sleep {
            return;
        }
        let resting = self.velocity.length_squared() <= velocity_threshold * velocity_threshold
            && self.angular_velocity.abs() <= velocity_threshold;
        if !resting {
            self.sleep_time = 0.0;
            return;
        }
        self.sleep_time += dt;
        if self.sleep_time >= time_threshold {
            self.sleep();
        }
    }

    // --- Notifications -------------------------------------------------------

    /// Registers a listener for collisions involving this body.
    pub fn on_collision(&mut self, listener: impl FnMut(&BodyCollision) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub(crate) fn emit_collision(&mut self, event: &BodyCollision) {
        self.listeners.emit(event);
    }
}
