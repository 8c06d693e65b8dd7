//! Bounding-volume tracker
//!
//! Keeps one world-space AABB per placed object, keyed by a stable id.
//! Boxes are recomputed from the object on demand; nothing outside the
//! tracker mutates a stored box. Enumeration follows first-registration
//! order, and re-registering an id overwrites its box in place.

use std::any::Any;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::scene::{Placeable, AABB};

/// Stable identifier of a placed object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create an id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ObjectId> for ObjectId {
    fn from(id: &ObjectId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A tracked object's id and its last computed world-space bounds
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedBox {
    /// Object id
    pub id: ObjectId,
    /// World-space bounds at the last update
    pub bounds: AABB,
}

/// Receives tracker changes, e.g. to mirror boxes as debug geometry
///
/// Observers are inert with respect to collision results.
pub trait BoundsObserver {
    /// A box was created or recomputed
    fn on_bounds_updated(&mut self, id: &ObjectId, bounds: &AABB, parent: Option<&ObjectId>);

    /// A box was discarded
    fn on_bounds_removed(&mut self, id: &ObjectId);

    /// Every box was discarded
    fn on_cleared(&mut self);

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for mutable type-specific access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Id-keyed store of world-space bounding boxes
#[derive(Default)]
pub struct BoundsTracker {
    /// Boxes in enumeration order
    boxes: Vec<TrackedBox>,

    /// Position of each id in `boxes`
    index: HashMap<ObjectId, usize>,

    /// Optional change listener
    observer: Option<Box<dyn BoundsObserver>>,
}

impl BoundsTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the box enclosing `object` and its descendants and store it under `id`
    ///
    /// An object without any geometry has no box; a previously stored box
    /// for the id is discarded in that case. Returns the stored bounds.
    pub fn update_box<P>(&mut self, id: impl Into<ObjectId>, object: &P) -> Option<AABB>
    where
        P: Placeable + ?Sized,
    {
        let id = id.into();
        match object.world_bounds() {
            Some(bounds) => {
                self.insert(id, bounds, object.parent_id());
                Some(bounds)
            }
            None => {
                log::debug!("Object '{}' has no geometry, dropping its bounds", id);
                self.remove(id.as_str());
                None
            }
        }
    }

    /// Store precomputed bounds under `id`
    pub fn insert(&mut self, id: impl Into<ObjectId>, bounds: AABB, parent: Option<&ObjectId>) {
        let id = id.into();
        log::trace!("Bounds for '{}': {:?} .. {:?}", id, bounds.min, bounds.max);

        if let Some(observer) = self.observer.as_mut() {
            observer.on_bounds_updated(&id, &bounds, parent);
        }

        match self.index.get(&id) {
            Some(&slot) => self.boxes[slot].bounds = bounds,
            None => {
                self.index.insert(id.clone(), self.boxes.len());
                self.boxes.push(TrackedBox { id, bounds });
            }
        }
    }

    /// Discard the box for `id`; no-op if it is not tracked
    pub fn remove(&mut self, id: &str) -> Option<AABB> {
        let slot = self.index.remove(id)?;
        let removed = self.boxes.remove(slot);

        // Shift the slots of everything registered after the removed box
        for tracked in &self.boxes[slot..] {
            if let Some(position) = self.index.get_mut(tracked.id.as_str()) {
                *position -= 1;
            }
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.on_bounds_removed(&removed.id);
        }

        Some(removed.bounds)
    }

    /// Bounds currently stored for `id`
    pub fn get(&self, id: &str) -> Option<&AABB> {
        self.index.get(id).map(|&slot| &self.boxes[slot].bounds)
    }

    /// Whether `id` has a box
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// A copy of the full id to box mapping
    pub fn get_all(&self) -> HashMap<ObjectId, AABB> {
        self.boxes
            .iter()
            .map(|tracked| (tracked.id.clone(), tracked.bounds))
            .collect()
    }

    /// Tracked boxes in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &TrackedBox> {
        self.boxes.iter()
    }

    /// Tracked boxes other than `id`, in enumeration order
    pub fn others<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TrackedBox> + 'a {
        self.boxes.iter().filter(move |tracked| tracked.id.as_str() != id)
    }

    /// Number of tracked boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Discard every tracked box
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.index.clear();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_cleared();
        }
    }

    /// Install a change observer, replacing any previous one
    pub fn set_observer(&mut self, observer: Box<dyn BoundsObserver>) {
        self.observer = Some(observer);
    }

    /// Remove and return the current observer
    pub fn take_observer(&mut self) -> Option<Box<dyn BoundsObserver>> {
        self.observer.take()
    }

    /// Current observer
    pub fn observer(&self) -> Option<&dyn BoundsObserver> {
        self.observer.as_deref()
    }

    /// Current observer, mutably
    pub fn observer_mut(&mut self) -> Option<&mut (dyn BoundsObserver + 'static)> {
        self.observer.as_deref_mut()
    }
}

impl fmt::Debug for BoundsTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundsTracker")
            .field("boxes", &self.boxes)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
