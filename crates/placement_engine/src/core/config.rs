//! # Unified Configuration System
//!
//! All tunables of the placement engine in one serializable tree. The
//! top-level [`PlacementConfig`] can be loaded from TOML or RON through the
//! [`Config`] trait; every section falls back to its defaults when omitted.
//!
//! ## Configuration Categories
//!
//! - **Logging**: Default log filter
//! - **Collision**: Room tolerance and the position search ring
//! - **Drag**: Controller-driven move/rotate behavior
//! - **Debug**: Bounding box visualization

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::config::float;
use crate::physics::SearchPattern;

/// # Logging Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter passed to `env_logger` (overridden by `RUST_LOG`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// # Collision Configuration
///
/// Tolerances used by room checks and the parameters of the ring search
/// performed when a desired position is blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Slack (world units) allowed past walls and ceiling before a room collision is reported
    #[serde(serialize_with = "float::f32")]
    pub epsilon: f32,
    /// Ring search around a blocked position
    pub search: SearchPattern,
}

impl CollisionConfig {
    /// Default room tolerance in world units
    pub const DEFAULT_EPSILON: f32 = 0.01;

    /// Set the room tolerance
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the search ring
    #[must_use]
    pub fn with_search(mut self, search: SearchPattern) -> Self {
        self.search = search;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::Invalid {
                field: "collision.epsilon",
                reason: format!("must be a finite non-negative number, got {}", self.epsilon),
            });
        }
        if !self.search.radius.is_finite() || self.search.radius < 0.0 {
            return Err(ConfigError::Invalid {
                field: "collision.search.radius",
                reason: format!("must be a finite non-negative number, got {}", self.search.radius),
            });
        }
        if self.search.attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "collision.search.attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            search: SearchPattern::default(),
        }
    }
}

/// # Drag Configuration
///
/// How thumbstick input turns into object motion while an item is selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Horizontal move speed in world units per second at full stick deflection
    #[serde(serialize_with = "float::f32")]
    pub move_speed: f32,
    /// Yaw speed in radians per second at full stick deflection
    #[serde(serialize_with = "float::f32")]
    pub rotate_speed: f32,
    /// Stick values at or below this magnitude are ignored
    #[serde(serialize_with = "float::f32")]
    pub deadzone: f32,
    /// Ring search attempts used while dragging (smaller than the default to keep frames cheap)
    pub search_attempts: usize,
    /// Height objects are pinned to while being dragged
    #[serde(serialize_with = "float::f32")]
    pub floor_height: f32,
}

impl DragConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "drag.move_speed",
                reason: format!("must be a finite positive number, got {}", self.move_speed),
            });
        }
        if !(self.rotate_speed.is_finite() && self.rotate_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "drag.rotate_speed",
                reason: format!("must be a finite positive number, got {}", self.rotate_speed),
            });
        }
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(ConfigError::Invalid {
                field: "drag.deadzone",
                reason: format!("must be in [0, 1), got {}", self.deadzone),
            });
        }
        if self.search_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "drag.search_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.floor_height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "drag.floor_height",
                reason: format!("must be finite, got {}", self.floor_height),
            });
        }
        Ok(())
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.5,
            rotate_speed: 1.5,
            deadzone: 0.1,
            search_attempts: 4,
            floor_height: 0.0,
        }
    }
}

/// # Debug Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw a wireframe box for every tracked bounding volume
    pub show_bounds: bool,
}

/// # Complete Placement Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Collision configuration
    pub collision: CollisionConfig,
    /// Drag configuration
    pub drag: DragConfig,
    /// Debug visualization configuration
    pub debug: DebugConfig,
}

impl PlacementConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;
        self.drag.validate()?;
        Ok(())
    }
}

impl Config for PlacementConfig {}
