//! Physics module for placement collision detection and resolution
//!
//! Tracks one world-space AABB per placed object, checks it against the room
//! boundary and against every other tracked box, and resolves blocked drag
//! targets with a small deterministic search.
//!
//! # Module Organization
//!
//! - [`bounds_tracker`] - Id-keyed AABB store with change observers
//! - [`room`] - Validated room boundary and boundary clamping
//! - [`collision_system`] - The [`CollisionDetector`] service and its queries
//! - [`resolver`] - Ring search for a collision-free position

pub mod bounds_tracker;
pub mod room;
pub mod collision_system;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use bounds_tracker::{BoundsObserver, BoundsTracker, ObjectId, TrackedBox};
pub use room::{RoomBoundary, RoomBoundaryDescriptor, RoomBoundaryError};
pub use collision_system::{CollisionDetector, CollisionResult, CollisionTarget};
pub use resolver::SearchPattern;
