//! Umbrella crate that re-exports the `engine-*` building blocks.
//!
//! `nav` brings in grid pathfinding, `physics` the fixed-step rigid body world, and `config`
//! a YAML loader for both crates' settings.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use engine_nav as nav;

#[cfg(feature = "physics")]
#[cfg_attr(docsrs, doc(cfg(feature = "physics")))]
pub use engine_physics as physics;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

#[cfg(feature = "config")]
pub use config::{ConfigError, EngineConfig};
