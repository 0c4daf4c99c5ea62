use thiserror::Error;

/// Invalid world configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("fixed time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    #[error("gravity must be finite, got ({x}, {y})")]
    InvalidGravity { x: f32, y: f32 },

    #[error("max sub-steps per step must be at least 1")]
    InvalidMaxSubsteps,

    #[error("solver iteration counts must be at least 1 (velocity {velocity}, position {position})")]
    InvalidIterations { velocity: u32, position: u32 },

    #[error("sleep thresholds must be non-negative and finite")]
    InvalidSleepThreshold,
}
