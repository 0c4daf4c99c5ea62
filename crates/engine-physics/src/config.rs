#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PhysicsError, Vec2};

/// Speed (linear units/s and rad/s) under which a body counts as resting.
pub const SLEEP_VELOCITY_THRESHOLD: f32 = 0.05;
/// Seconds a body must rest before auto-sleep puts it to sleep.
pub const SLEEP_TIME_THRESHOLD: f32 = 0.5;
/// Default cap on fixed sub-steps run by a single `step` call.
pub const MAX_SUBSTEPS_PER_STEP: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    pub gravity: Vec2,
    /// Length of one simulation sub-step in seconds.
    pub fixed_time_step: f32,
    /// Most sub-steps one `step` call may run. Time beyond that is dropped.
    pub max_substeps_per_step: u32,
    /// Reserved for an iterative contact solver; stored and validated only.
    pub velocity_iterations: u32,
    /// Reserved for an iterative contact solver; stored and validated only.
    pub position_iterations: u32,
    /// Put resting dynamic bodies to sleep automatically.
    pub auto_sleep: bool,
    pub sleep_velocity_threshold: f32,
    pub sleep_time_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            fixed_time_step: 1.0 / 60.0,
            max_substeps_per_step: MAX_SUBSTEPS_PER_STEP,
            velocity_iterations: 8,
            position_iterations: 3,
            auto_sleep: false,
            sleep_velocity_threshold: SLEEP_VELOCITY_THRESHOLD,
            sleep_time_threshold: SLEEP_TIME_THRESHOLD,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.fixed_time_step > 0.0 && self.fixed_time_step.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep(self.fixed_time_step));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        if self.max_substeps_per_step == 0 {
            return Err(PhysicsError::InvalidMaxSubsteps);
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return Err(PhysicsError::InvalidIterations {
                velocity: self.velocity_iterations,
                position: self.position_iterations,
            });
        }
        let threshold_ok = |v: f32| v >= 0.0 && v.is_finite();
        if !threshold_ok(self.sleep_velocity_threshold) || !threshold_ok(self.sleep_time_threshold) {
            return Err(PhysicsError::InvalidSleepThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(PhysicsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_time_step() {
        let cfg = PhysicsConfig {
            fixed_time_step: 0.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(PhysicsError::InvalidTimeStep(0.0)));

        let cfg = PhysicsConfig {
            fixed_time_step: f32::NAN,
            ..PhysicsConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(PhysicsError::InvalidTimeStep(_))));
    }

    #[test]
    fn rejects_zero_substep_cap() {
        let cfg = PhysicsConfig {
            max_substeps_per_step: 0,
            ..PhysicsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(PhysicsError::InvalidMaxSubsteps));
    }

    #[test]
    fn rejects_zero_iterations() {
        let cfg = PhysicsConfig {
            velocity_iterations: 0,
            ..PhysicsConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(PhysicsError::InvalidIterations {
                velocity: 0,
                position: 3
            })
        );
    }
}
