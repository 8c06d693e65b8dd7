//! # Core Engine Module
//!
//! Shared configuration used by every other subsystem.

pub mod config;

// Re-export commonly used config types
pub use config::{
    PlacementConfig,
    LoggingConfig,
    CollisionConfig,
    DragConfig,
    DebugConfig,
    Config,
    ConfigError,
};
