//! Fixed-step 2D rigid body simulation: integration, broad-phase overlap events and spatial
//! queries.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod body;
pub mod body_set;
pub mod config;
pub mod error;
pub mod events;
pub mod math;
pub mod query;
pub mod shape;
pub mod world;

pub use body::{BodyType, ForceMode, RigidBody};
pub use body_set::{BodyHandle, BodySet};
pub use config::{
    PhysicsConfig, MAX_SUBSTEPS_PER_STEP, SLEEP_TIME_THRESHOLD, SLEEP_VELOCITY_THRESHOLD,
};
pub use error::PhysicsError;
pub use events::{
    BodyCollision, CollisionInfo, ListenerId, Listeners, TriggerEvent, TriggerPhase,
};
pub use math::Vec2;
pub use query::RaycastHit;
pub use shape::{Aabb, Shape};
pub use world::{PhysicsWorld, StepHooks};
