//! Thumbstick dragging of the selected item
//!
//! Each frame the editor hands the controller the raw stick state of every
//! connected hand controller. The right stick slides the selected item on the
//! floor relative to where the viewer is looking; the left stick turns it.
//! Moves are validated through the position resolver before they are
//! committed, so a blocked drag leaves the item where it was.

use crate::core::config::DragConfig;
use crate::foundation::math::{horizontal_direction, Transform, Vec3};
use crate::physics::{CollisionDetector, CollisionResult};
use crate::scene::Movable;

/// Which hand a controller is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    /// Left hand: rotation
    Left,
    /// Right hand: movement
    Right,
    /// Unknown hand; ignored
    #[default]
    None,
}

/// Stick state of one hand controller for the current frame
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    /// Hand the controller is held in
    pub handedness: Handedness,
    /// Raw gamepad axes; the thumbstick lives at indices 2 (x) and 3 (y)
    pub axes: Vec<f32>,
}

impl ControllerState {
    /// Index of the thumbstick X axis
    pub const STICK_X: usize = 2;
    /// Index of the thumbstick Y axis
    pub const STICK_Y: usize = 3;

    /// Create a controller state from raw axes
    pub fn new(handedness: Handedness, axes: impl Into<Vec<f32>>) -> Self {
        Self {
            handedness,
            axes: axes.into(),
        }
    }

    /// Thumbstick deflection, if the controller reports a full stick
    fn stick(&self) -> Option<(f32, f32)> {
        if self.axes.len() <= Self::STICK_Y {
            return None;
        }
        Some((self.axes[Self::STICK_X], self.axes[Self::STICK_Y]))
    }
}

/// Viewer orientation used to make stick motion camera-relative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    /// Direction the viewer is looking
    pub forward: Vec3,
    /// Viewer's right-hand direction
    pub right: Vec3,
}

impl ViewBasis {
    /// Basis of a camera looking down its local -Z axis
    pub fn from_camera(camera: &Transform) -> Self {
        Self {
            forward: camera.rotation * Vec3::new(0.0, 0.0, -1.0),
            right: camera.rotation * Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

impl Default for ViewBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

/// What happened to the item's position this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// No movement input
    None,
    /// Moved to exactly where the stick pointed
    Moved(Vec3),
    /// Target was blocked; moved to a nearby clear spot instead
    Adjusted(Vec3),
    /// Target and every nearby spot were blocked; the item stayed put
    Blocked,
}

/// Result of one drag step
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    /// Position change applied this frame
    pub movement: Movement,
    /// Whether the item was turned this frame
    pub rotated: bool,
    /// Collision state of the item after the step
    pub collision: CollisionResult,
}

impl DragOutcome {
    fn idle() -> Self {
        Self {
            movement: Movement::None,
            rotated: false,
            collision: CollisionResult::none(),
        }
    }

    /// Whether the item's position or orientation changed
    pub fn changed(&self) -> bool {
        self.rotated || matches!(self.movement, Movement::Moved(_) | Movement::Adjusted(_))
    }
}

/// Stick input gathered from all controllers
#[derive(Debug, Clone, Copy, Default)]
struct StickInput {
    /// Right stick, x = strafe, z = stick y (negative is forward)
    movement: Vec3,
    /// Left stick yaw, positive turns counter-clockwise
    rotation: f32,
}

/// Drives the selected item from thumbstick input
#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: DragConfig,
    navigation_mode: bool,
}

impl DragController {
    /// Create a controller with the given drag settings
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            navigation_mode: false,
        }
    }

    /// Drag settings in use
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// While navigating the sticks move the viewer, not the selected item
    pub fn set_navigation_mode(&mut self, enabled: bool) {
        self.navigation_mode = enabled;
    }

    /// Whether navigation mode is active
    pub fn navigation_mode(&self) -> bool {
        self.navigation_mode
    }

    fn filtered(&self, value: f32) -> Option<f32> {
        (value.is_finite() && value.abs() > self.config.deadzone).then_some(value)
    }

    fn read_sticks(&self, controllers: &[ControllerState]) -> StickInput {
        let mut input = StickInput::default();

        for controller in controllers {
            let Some((x, y)) = controller.stick() else {
                continue;
            };
            match controller.handedness {
                Handedness::Right => {
                    if let Some(x) = self.filtered(x) {
                        input.movement.x = x;
                    }
                    if let Some(y) = self.filtered(y) {
                        input.movement.z = y;
                    }
                }
                Handedness::Left => {
                    if let Some(x) = self.filtered(x) {
                        input.rotation = -x;
                    }
                }
                Handedness::None => {}
            }
        }
        input
    }

    /// Advance the drag of `object` (tracked as `id`) by one frame
    ///
    /// The object is moved and its tracked box refreshed only when the
    /// resolver finds a clear spot; rotation is applied unconditionally.
    pub fn step<M>(
        &self,
        detector: &mut CollisionDetector,
        id: &str,
        object: &mut M,
        controllers: &[ControllerState],
        view: &ViewBasis,
        delta_time: f32,
    ) -> DragOutcome
    where
        M: Movable + ?Sized,
    {
        if self.navigation_mode {
            return DragOutcome {
                collision: detector.check_all_collisions(id),
                ..DragOutcome::idle()
            };
        }

        let input = self.read_sticks(controllers);
        let mut outcome = DragOutcome::idle();

        if input.movement.magnitude() > self.config.deadzone {
            outcome.movement = self.apply_move(detector, id, object, input.movement, view, delta_time);
        }

        if input.rotation.abs() > self.config.deadzone {
            object.rotate_yaw(input.rotation * self.config.rotate_speed * delta_time);
            outcome.rotated = true;
        }

        if outcome.changed() {
            detector.update_box(id, &*object);
        }

        outcome.collision = detector.check_all_collisions(id);
        if outcome.changed() && outcome.collision.has_collision {
            log::warn!(
                "Collision detected for '{}': {}",
                id,
                outcome.collision.colliding_ids().join(", ")
            );
        }
        outcome
    }

    fn apply_move<M>(
        &self,
        detector: &CollisionDetector,
        id: &str,
        object: &mut M,
        stick: Vec3,
        view: &ViewBasis,
        delta_time: f32,
    ) -> Movement
    where
        M: Movable + ?Sized,
    {
        let forward = horizontal_direction(view.forward);
        let right = horizontal_direction(view.right);
        let speed = self.config.move_speed * delta_time;

        let mut target = object.position() + forward * (-stick.z * speed) + right * (stick.x * speed);
        target.y = self.config.floor_height;

        match detector.find_valid_position(id, target, &*object, self.config.search_attempts) {
            Some(position) => {
                object.set_position(position);
                if position == target {
                    Movement::Moved(position)
                } else {
                    Movement::Adjusted(position)
                }
            }
            None => {
                log::debug!("Drag of '{}' blocked at {:?}", id, target);
                Movement::Blocked
            }
        }
    }
}
