//! Collision query engine
//!
//! [`CollisionDetector`] is the service object presentation code talks to.
//! It owns the bounds tracker and the active room boundary, answers overlap
//! queries for a tracked id, and hosts the position resolver (see
//! `resolver.rs`). Create one when a scene is mounted, set the boundary when
//! the room loads, and call [`CollisionDetector::clear`] on unmount.
//!
//! Absent data never fails a query: an untracked id or a missing boundary
//! simply produces "no collision" (or infinite distance).

use std::collections::HashMap;
use std::fmt;

use crate::core::config::CollisionConfig;
use crate::foundation::math::Vec3;
use crate::physics::bounds_tracker::{BoundsObserver, BoundsTracker, ObjectId};
use crate::physics::room::{RoomBoundary, RoomBoundaryDescriptor, RoomBoundaryError};
use crate::scene::{Placeable, AABB};

/// Something a tracked object collides with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollisionTarget {
    /// The room boundary (walls or ceiling)
    Room,
    /// Another tracked object
    Object(ObjectId),
}

impl CollisionTarget {
    /// Reserved id reported for room collisions
    pub const ROOM_SENTINEL: &'static str = "room";

    /// The target as an id string (`"room"` for the boundary)
    pub fn as_str(&self) -> &str {
        match self {
            Self::Room => Self::ROOM_SENTINEL,
            Self::Object(id) => id.as_str(),
        }
    }
}

impl fmt::Display for CollisionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a collision query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Whether anything collides
    pub has_collision: bool,
    /// Room first (if hit), then objects in tracker enumeration order
    pub colliding_objects: Vec<CollisionTarget>,
    /// Horizontal direction from the object's center toward the room center;
    /// only set for room collisions
    pub collision_normal: Option<Vec3>,
}

impl CollisionResult {
    /// A result reporting no collision
    pub fn none() -> Self {
        Self::default()
    }

    /// Union of a room result and a furniture result
    ///
    /// The room entry (if any) comes first and the normal is taken from the
    /// room result only.
    pub fn merge(room: Self, furniture: Self) -> Self {
        let mut colliding_objects = room.colliding_objects;
        colliding_objects.extend(furniture.colliding_objects);

        Self {
            has_collision: room.has_collision || furniture.has_collision,
            colliding_objects,
            collision_normal: room.collision_normal,
        }
    }

    /// Whether the room boundary is among the colliders
    pub fn hits_room(&self) -> bool {
        self.colliding_objects.contains(&CollisionTarget::Room)
    }

    /// Whether a given object id is among the colliders
    pub fn hits_object(&self, id: &str) -> bool {
        self.colliding_objects
            .iter()
            .any(|target| matches!(target, CollisionTarget::Object(other) if other.as_str() == id))
    }

    /// Collider ids as strings, room sentinel included
    pub fn colliding_ids(&self) -> Vec<&str> {
        self.colliding_objects.iter().map(CollisionTarget::as_str).collect()
    }
}

/// Collision detection service for placed furniture
pub struct CollisionDetector {
    /// Per-object world-space bounds
    tracker: BoundsTracker,

    /// Active room boundary
    room: Option<RoomBoundary>,

    /// Tolerances and search parameters
    config: CollisionConfig,
}

impl CollisionDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create a detector with the given configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            tracker: BoundsTracker::new(),
            room: None,
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Bounds tracking
    // ---------------------------------------------------------------------

    /// Recompute and store the world-space bounds of `object` under `id`
    pub fn update_box<P>(&mut self, id: impl Into<ObjectId>, object: &P) -> Option<AABB>
    where
        P: Placeable + ?Sized,
    {
        self.tracker.update_box(id, object)
    }

    /// Stop tracking `id`; no-op if it is not tracked
    pub fn remove(&mut self, id: &str) {
        if self.tracker.remove(id).is_some() {
            log::debug!("Stopped tracking '{}'", id);
        }
    }

    /// Bounds currently stored for `id`
    pub fn tracked_box(&self, id: &str) -> Option<&AABB> {
        self.tracker.get(id)
    }

    /// A copy of every tracked box
    pub fn get_all(&self) -> HashMap<ObjectId, AABB> {
        self.tracker.get_all()
    }

    /// Read access to the tracker
    pub fn tracker(&self) -> &BoundsTracker {
        &self.tracker
    }

    /// Discard every tracked box and reset the room boundary
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.room = None;
        log::debug!("Collision data cleared");
    }

    /// Install a bounds observer (e.g. a debug visualizer)
    pub fn set_observer(&mut self, observer: Box<dyn BoundsObserver>) {
        self.tracker.set_observer(observer);
    }

    /// Remove and return the bounds observer
    pub fn take_observer(&mut self) -> Option<Box<dyn BoundsObserver>> {
        self.tracker.take_observer()
    }

    /// Typed access to the installed observer
    pub fn observer<T: BoundsObserver + 'static>(&self) -> Option<&T> {
        self.tracker.observer()?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to the installed observer
    pub fn observer_mut<T: BoundsObserver + 'static>(&mut self) -> Option<&mut T> {
        self.tracker.observer_mut()?.as_any_mut().downcast_mut::<T>()
    }

    // ---------------------------------------------------------------------
    // Room boundary
    // ---------------------------------------------------------------------

    /// Replace the active room boundary
    ///
    /// Rejected boundaries leave the previous one in place.
    pub fn set_boundary(
        &mut self,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
    ) -> Result<(), RoomBoundaryError> {
        let room = RoomBoundary::from_extents(min_x, max_x, min_y, max_y, min_z, max_z)
            .inspect_err(|e| log::warn!("Ignoring room boundary: {}", e))?;
        self.set_room_boundary(room);
        Ok(())
    }

    /// Replace the active room boundary from a spatial data descriptor
    pub fn set_boundary_from(&mut self, descriptor: &RoomBoundaryDescriptor) -> Result<(), RoomBoundaryError> {
        let room = descriptor
            .to_boundary()
            .inspect_err(|e| log::warn!("Ignoring room boundary: {}", e))?;
        self.set_room_boundary(room);
        Ok(())
    }

    /// Replace the active room boundary with an already validated one
    pub fn set_room_boundary(&mut self, room: RoomBoundary) {
        log::info!("Room boundary set: {:?} .. {:?}", room.min(), room.max());
        self.room = Some(room);
    }

    /// Active room boundary
    pub fn boundary(&self) -> Option<&RoomBoundary> {
        self.room.as_ref()
    }

    /// Whether a room boundary is active
    pub fn has_boundary(&self) -> bool {
        self.room.is_some()
    }

    /// Drop the room boundary; room checks are disabled until a new one is set
    pub fn clear_boundary(&mut self) {
        self.room = None;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Check the tracked box of `id` against the room walls and ceiling
    pub fn check_room_collision(&self, id: &str) -> CollisionResult {
        match self.tracker.get(id) {
            Some(bounds) => self.room_collision_for(bounds),
            None => CollisionResult::none(),
        }
    }

    /// Check the tracked box of `id` against every other tracked box
    pub fn check_furniture_collisions(&self, id: &str) -> CollisionResult {
        match self.tracker.get(id) {
            Some(bounds) => self.furniture_collisions_for(id, bounds),
            None => CollisionResult::none(),
        }
    }

    /// Room and furniture checks combined
    pub fn check_all_collisions(&self, id: &str) -> CollisionResult {
        match self.tracker.get(id) {
            Some(bounds) => self.all_collisions_for(id, bounds),
            None => CollisionResult::none(),
        }
    }

    /// Smallest gap between `id` and any other tracked box (0.0 when overlapping)
    ///
    /// Infinite when `id` is untracked or nothing else is tracked.
    pub fn distance_to_nearest_collision(&self, id: &str) -> f32 {
        let Some(bounds) = self.tracker.get(id) else {
            return f32::INFINITY;
        };

        self.tracker
            .others(id)
            .map(|other| bounds.distance_to(&other.bounds))
            .fold(f32::INFINITY, f32::min)
    }

    /// Nearest position keeping a box with `half_extents` inside the room
    ///
    /// Returns `position` unchanged when no boundary is active.
    pub fn constrain_to_room(&self, position: Vec3, half_extents: Vec3) -> Vec3 {
        self.room
            .as_ref()
            .map_or(position, |room| room.constrain(position, half_extents))
    }

    /// Room check for arbitrary bounds
    pub(crate) fn room_collision_for(&self, bounds: &AABB) -> CollisionResult {
        let Some(room) = &self.room else {
            return CollisionResult::none();
        };

        if !room.is_exceeded_by(bounds, self.config.epsilon) {
            return CollisionResult::none();
        }

        CollisionResult {
            has_collision: true,
            colliding_objects: vec![CollisionTarget::Room],
            collision_normal: Some(room.push_direction(bounds)),
        }
    }

    /// Furniture check for arbitrary bounds standing in for `id`
    pub(crate) fn furniture_collisions_for(&self, id: &str, bounds: &AABB) -> CollisionResult {
        let colliding_objects: Vec<_> = self
            .tracker
            .others(id)
            .filter(|other| bounds.intersects(&other.bounds))
            .map(|other| CollisionTarget::Object(other.id.clone()))
            .collect();

        CollisionResult {
            has_collision: !colliding_objects.is_empty(),
            colliding_objects,
            collision_normal: None,
        }
    }

    /// Room and furniture checks for arbitrary bounds standing in for `id`
    pub(crate) fn all_collisions_for(&self, id: &str, bounds: &AABB) -> CollisionResult {
        CollisionResult::merge(
            self.room_collision_for(bounds),
            self.furniture_collisions_for(id, bounds),
        )
    }
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollisionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionDetector")
            .field("tracked", &self.tracker.len())
            .field("room", &self.room)
            .field("config", &self.config)
            .finish()
    }
}
