//! Construction tool configuration
//!
//! Settings shared by every shape tool. They can be loaded from a RON file;
//! missing fields fall back to their defaults.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_RAY_LENGTH;
use crate::projection::ConstraintPlane;

/// What to do when the pointer ray misses the working plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Keep the previous live point and preview, flagged as without intersection
    #[default]
    HoldPrevious,
    /// Forget the live point so a click cannot confirm a stale position
    ClearLive,
}

/// Working plane settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Point on the plane
    pub point: [f32; 3],
    /// Plane normal
    pub normal: [f32; 3],
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            point: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        }
    }
}

impl From<PlaneConfig> for ConstraintPlane {
    fn from(config: PlaneConfig) -> Self {
        ConstraintPlane::new(Vec3::from(config.point), Vec3::from(config.normal))
    }
}

/// Shape tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Plane shapes are drawn on
    pub ground_plane: PlaneConfig,
    /// Handling of rays parallel to the working plane
    pub degenerate: DegeneratePolicy,
    /// Pointer rays shorter than this are rejected
    pub min_ray_length: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ground_plane: PlaneConfig::default(),
            degenerate: DegeneratePolicy::default(),
            min_ray_length: MIN_RAY_LENGTH,
        }
    }
}

impl ToolConfig {
    /// Ground plane as a constraint plane
    pub fn ground(&self) -> ConstraintPlane {
        self.ground_plane.into()
    }

    /// Parse configuration from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded tool config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
