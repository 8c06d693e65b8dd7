//! # Placement Engine
//!
//! Collision detection and constraint resolution for an immersive furniture
//! placement editor.
//!
//! ## Features
//!
//! - **Bounds Tracking**: One world-space AABB per placed object, keyed by a stable id
//! - **Room Boundary**: Walls and ceiling enforced, the floor deliberately left open
//! - **Collision Queries**: Room and furniture overlap checks with ordered results
//! - **Position Resolution**: Deterministic ring search around a blocked drag target
//! - **Debug Visualization**: Optional wireframe boxes driven by tracker notifications
//! - **Interaction**: Thumbstick dragging and the pre-save collision report
//!
//! ## Quick Start
//!
//! ```rust
//! use placement_engine::prelude::*;
//!
//! let mut detector = CollisionDetector::new();
//! detector.set_boundary(0.0, 10.0, 0.0, 3.0, 0.0, 10.0).unwrap();
//!
//! let sofa = SceneNode::new(Transform::from_position(Vec3::new(4.5, 0.0, 4.5)))
//!     .with_bounds(AABB::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5)));
//! detector.update_box("sofa", &sofa);
//!
//! let result = detector.check_all_collisions("sofa");
//! assert!(!result.has_collision);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod scene;
pub mod physics;
pub mod debug;
pub mod interaction;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec3, Mat4, Quat, Transform},
        scene::{AABB, Placeable, Movable, SceneNode, SceneLayout, LayoutItem},
        physics::{
            CollisionDetector, CollisionResult, CollisionTarget, ObjectId,
            RoomBoundary, RoomBoundaryDescriptor, RoomBoundaryError,
            SearchPattern, BoundsObserver, TrackedBox,
        },
        debug::BoundsDebugVisualizer,
        interaction::{
            DragController, DragOutcome, Movement, ControllerState, Handedness, ViewBasis,
            CollisionReport, CollisionWarning, spawn_position,
        },
        core::config::{PlacementConfig, CollisionConfig, DragConfig, DebugConfig, LoggingConfig},
        config::{Config, ConfigError},
    };
}
