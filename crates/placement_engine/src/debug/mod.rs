//! Debug module for visualization and debugging tools

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugShape, DebugDrawSystem};
pub use collision_debug::{BoundsDebugColors, BoundsDebugVisualizer};
