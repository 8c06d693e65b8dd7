//! Position resolver
//!
//! When a desired position is blocked, candidates are sampled on a ring
//! around it and the first clear one wins. The search is local and
//! deterministic: the same inputs always try the same candidates in the
//! same order. A free spot outside the ring is not found; callers treat
//! `None` as "reject this move".
//!
//! Probing never touches live state. Each candidate is evaluated by
//! translating the object's freshly computed box by the offset between the
//! candidate and the object's current position.

use serde::{Serialize, Deserialize};

use crate::config::float;
use crate::foundation::math::{constants::TAU, Vec3};
use crate::physics::collision_system::CollisionDetector;
use crate::scene::{Placeable, AABB};

/// Ring of candidate offsets sampled around a blocked position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPattern {
    /// Distance of each candidate from the desired position (world units)
    #[serde(serialize_with = "float::f32")]
    pub radius: f32,
    /// Number of candidates, evenly spaced starting at angle 0 (+X)
    pub attempts: usize,
}

impl SearchPattern {
    /// Default ring radius
    pub const DEFAULT_RADIUS: f32 = 0.5;
    /// Default number of candidates
    pub const DEFAULT_ATTEMPTS: usize = 8;

    /// Create a search pattern
    pub fn new(radius: f32, attempts: usize) -> Self {
        Self { radius, attempts }
    }

    /// Same radius, different number of candidates
    #[must_use]
    pub fn with_attempts(self, attempts: usize) -> Self {
        Self { attempts, ..self }
    }

    /// Candidate positions around `center`, in probing order
    ///
    /// Candidate `i` sits at angle `i * 2π / attempts` in the XZ plane; Y is
    /// kept at `center.y`.
    pub fn candidates(&self, center: Vec3) -> impl Iterator<Item = Vec3> + '_ {
        let step = if self.attempts == 0 { 0.0 } else { TAU / self.attempts as f32 };
        (0..self.attempts).map(move |i| {
            let angle = step * i as f32;
            Vec3::new(
                center.x + angle.cos() * self.radius,
                center.y,
                center.z + angle.sin() * self.radius,
            )
        })
    }
}

impl Default for SearchPattern {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS, Self::DEFAULT_ATTEMPTS)
    }
}

impl CollisionDetector {
    /// Find a collision-free position for `object` at or near `desired`
    ///
    /// Uses the configured search radius and `max_attempts` candidates.
    /// Returns `desired` itself when it is already clear, the first clear
    /// ring candidate otherwise, or `None` when everything sampled is
    /// blocked. Neither `object` nor the tracked box for `id` is modified;
    /// the caller commits the move and calls `update_box`.
    pub fn find_valid_position<P>(&self, id: &str, desired: Vec3, object: &P, max_attempts: usize) -> Option<Vec3>
    where
        P: Placeable + ?Sized,
    {
        let pattern = self.config().search.with_attempts(max_attempts);
        self.find_valid_position_with(id, desired, object, &pattern)
    }

    /// [`find_valid_position`](Self::find_valid_position) with an explicit search pattern
    pub fn find_valid_position_with<P>(
        &self,
        id: &str,
        desired: Vec3,
        object: &P,
        pattern: &SearchPattern,
    ) -> Option<Vec3>
    where
        P: Placeable + ?Sized,
    {
        // Objects without geometry cannot collide
        let Some(current) = object.world_bounds() else {
            return Some(desired);
        };
        let origin = object.position();

        if self.is_clear_at(id, &current, origin, desired) {
            return Some(desired);
        }

        let found = pattern
            .candidates(desired)
            .find(|&candidate| self.is_clear_at(id, &current, origin, candidate));

        match found {
            Some(candidate) => {
                log::debug!("'{}' blocked at {:?}, resolved to {:?}", id, desired, candidate);
            }
            None => {
                log::debug!(
                    "'{}' blocked at {:?}, no clear spot within {} of it",
                    id,
                    desired,
                    pattern.radius
                );
            }
        }
        found
    }

    /// Whether `object` would be collision-free at `position`
    pub fn is_position_valid<P>(&self, id: &str, position: Vec3, object: &P) -> bool
    where
        P: Placeable + ?Sized,
    {
        object
            .world_bounds()
            .map_or(true, |current| self.is_clear_at(id, &current, object.position(), position))
    }

    /// Bounds the object would have if its origin moved from `origin` to `position`
    fn bounds_at(current: &AABB, origin: Vec3, position: Vec3) -> AABB {
        current.translated(position - origin)
    }

    fn is_clear_at(&self, id: &str, current: &AABB, origin: Vec3, position: Vec3) -> bool {
        let moved = Self::bounds_at(current, origin, position);
        !self.all_collisions_for(id, &moved).has_collision
    }
}
