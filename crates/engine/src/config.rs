//! Engine configuration loading.

use std::path::{Path, PathBuf};

use engine_nav::PathfinderConfig;
use engine_physics::{PhysicsConfig, PhysicsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid physics config: {0}")]
    Physics(#[from] PhysicsError),
}

/// Settings for both simulation crates, usually loaded from a YAML file:
///
/// ```yaml
/// physics:
///   gravity: { x: 0.0, y: 9.81 }
///   fixed_time_step: 0.016666668
/// pathfinding:
///   heuristic: octile
///   smoothing: line_of_sight
/// ```
///
/// Every section and field is optional; omitted values take their defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub pathfinding: PathfinderConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.physics.validate()?;
        tracing::debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    /// Like [`EngineConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no engine config, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate an in-memory YAML document. Parse failures report an empty path.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(yaml).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.physics.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is valid and means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_yaml_str("  \n").expect("empty yaml");
        assert_eq!(config.physics, PhysicsConfig::default());
        assert_eq!(config.pathfinding.max_iterations, 0);
    }
}
