//! Editor-facing interaction on top of the collision engine
//!
//! Thumbstick dragging of the selected item and where new items appear.
//! [`CollisionReport`] is what the editor shows before a layout is saved.

pub mod drag;
pub mod report;
pub mod spawn;

pub use drag::{ControllerState, DragController, DragOutcome, Handedness, Movement, ViewBasis};
pub use report::{CollisionReport, CollisionWarning};
pub use spawn::{spawn_position, SPAWN_DISTANCE};
