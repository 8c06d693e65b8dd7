//! Room boundary store and boundary clamping
//!
//! A room is a single axis-aligned box describing the volume furniture may
//! occupy. Walls (X/Z) and the ceiling (max Y) are enforced; the floor is
//! not, so objects may rest on or sink below `min.y` without being flagged.

use serde::{Serialize, Deserialize};

use crate::config::float;
use crate::foundation::math::{horizontal_direction, Vec3};
use crate::scene::AABB;

/// Errors raised when a room boundary is rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RoomBoundaryError {
    /// A coordinate was NaN or infinite
    #[error("room boundary {axis} range is not finite ({min}..{max})")]
    NonFinite {
        /// Offending axis ("x", "y" or "z")
        axis: &'static str,
        /// Minimum supplied for the axis
        min: f32,
        /// Maximum supplied for the axis
        max: f32,
    },

    /// The minimum exceeded the maximum
    #[error("room boundary {axis} range is inverted: min {min} > max {max}")]
    Inverted {
        /// Offending axis ("x", "y" or "z")
        axis: &'static str,
        /// Minimum supplied for the axis
        min: f32,
        /// Maximum supplied for the axis
        max: f32,
    },
}

/// Room extents as delivered by the spatial data source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBoundaryDescriptor {
    /// Wall at the low X end
    #[serde(serialize_with = "float::f32")]
    pub min_x: f32,
    /// Wall at the high X end
    #[serde(serialize_with = "float::f32")]
    pub max_x: f32,
    /// Nominal floor height (not enforced)
    #[serde(serialize_with = "float::f32")]
    pub min_y: f32,
    /// Ceiling height
    #[serde(serialize_with = "float::f32")]
    pub max_y: f32,
    /// Wall at the low Z end
    #[serde(serialize_with = "float::f32")]
    pub min_z: f32,
    /// Wall at the high Z end
    #[serde(serialize_with = "float::f32")]
    pub max_z: f32,
}

impl RoomBoundaryDescriptor {
    /// Validate the descriptor and turn it into a boundary
    pub fn to_boundary(&self) -> Result<RoomBoundary, RoomBoundaryError> {
        RoomBoundary::from_extents(self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z)
    }
}

impl From<RoomBoundary> for RoomBoundaryDescriptor {
    fn from(room: RoomBoundary) -> Self {
        Self {
            min_x: room.min.x,
            max_x: room.max.x,
            min_y: room.min.y,
            max_y: room.max.y,
            min_z: room.min.z,
            max_z: room.max.z,
        }
    }
}

/// A validated room boundary
///
/// Construction rejects non-finite coordinates and inverted ranges, so every
/// instance satisfies `min <= max` on all three axes. Zero-thickness ranges
/// are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBoundary {
    min: Vec3,
    max: Vec3,
}

impl RoomBoundary {
    /// Create a boundary from its min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, RoomBoundaryError> {
        for (axis, lo, hi) in [("x", min.x, max.x), ("y", min.y, max.y), ("z", min.z, max.z)] {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(RoomBoundaryError::NonFinite { axis, min: lo, max: hi });
            }
            if lo > hi {
                return Err(RoomBoundaryError::Inverted { axis, min: lo, max: hi });
            }
        }
        Ok(Self { min, max })
    }

    /// Create a boundary from per-axis ranges, in the order the spatial data source uses
    pub fn from_extents(
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
    ) -> Result<Self, RoomBoundaryError> {
        Self::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z))
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center of the room volume
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The room volume as a box
    pub fn bounds(&self) -> AABB {
        AABB::new(self.min, self.max)
    }

    /// Whether a box pokes through a wall or the ceiling by more than `epsilon`
    ///
    /// The floor is intentionally not checked.
    pub fn is_exceeded_by(&self, bounds: &AABB, epsilon: f32) -> bool {
        let outside_x = bounds.min.x < self.min.x - epsilon || bounds.max.x > self.max.x + epsilon;
        let outside_z = bounds.min.z < self.min.z - epsilon || bounds.max.z > self.max.z + epsilon;
        let through_ceiling = bounds.max.y > self.max.y + epsilon;

        outside_x || outside_z || through_ceiling
    }

    /// Horizontal unit vector from a box's center toward the room center
    ///
    /// Zero when the two centers line up vertically.
    pub fn push_direction(&self, bounds: &AABB) -> Vec3 {
        horizontal_direction(self.center() - bounds.center())
    }

    /// Nearest position keeping a box with the given half-extents inside the room
    ///
    /// X and Z are kept between the walls, Y only below the ceiling. When the
    /// box is wider than the room the max-side wall wins.
    pub fn constrain(&self, position: Vec3, half_extents: Vec3) -> Vec3 {
        let mut corrected = position;

        if corrected.x - half_extents.x < self.min.x {
            corrected.x = self.min.x + half_extents.x;
        }
        if corrected.x + half_extents.x > self.max.x {
            corrected.x = self.max.x - half_extents.x;
        }

        // Ceiling only; resting on (or below) the floor is allowed
        if corrected.y + half_extents.y > self.max.y {
            corrected.y = self.max.y - half_extents.y;
        }

        if corrected.z - half_extents.z < self.min.z {
            corrected.z = self.min.z + half_extents.z;
        }
        if corrected.z + half_extents.z > self.max.z {
            corrected.z = self.max.z - half_extents.z;
        }

        corrected
    }

    /// Whether a point lies inside the room volume (floor included)
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.bounds().contains_point(point)
    }

    /// Clamp a point into the room volume on all three axes
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        self.bounds().clamp_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn room() -> RoomBoundary {
        RoomBoundary::from_extents(0.0, 10.0, 0.0, 3.0, 0.0, 10.0).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_non_finite() {
        assert_eq!(
            RoomBoundary::from_extents(5.0, 1.0, 0.0, 3.0, 0.0, 10.0),
            Err(RoomBoundaryError::Inverted { axis: "x", min: 5.0, max: 1.0 })
        );
        assert!(matches!(
            RoomBoundary::from_extents(0.0, 10.0, 0.0, f32::NAN, 0.0, 10.0),
            Err(RoomBoundaryError::NonFinite { axis: "y", .. })
        ));
        // Flat rooms are accepted
        assert!(RoomBoundary::from_extents(0.0, 10.0, 0.0, 0.0, 0.0, 10.0).is_ok());
    }

    #[test]
    fn test_floor_is_never_enforced() {
        let sunk = AABB::new(Vec3::new(4.0, -5.0, 4.0), Vec3::new(5.0, 1.0, 5.0));
        assert!(!room().is_exceeded_by(&sunk, 0.01));
    }

    #[test]
    fn test_walls_and_ceiling_respect_epsilon() {
        let room = room();
        let within_tolerance = AABB::new(Vec3::new(-0.005, 0.0, 0.0), Vec3::new(1.0, 3.005, 1.0));
        assert!(!room.is_exceeded_by(&within_tolerance, 0.01));

        let through_ceiling = AABB::new(Vec3::new(4.0, 2.5, 4.0), Vec3::new(5.0, 3.5, 5.0));
        assert!(room.is_exceeded_by(&through_ceiling, 0.01));

        let through_wall = AABB::new(Vec3::new(4.0, 0.0, 9.5), Vec3::new(5.0, 1.0, 10.5));
        assert!(room.is_exceeded_by(&through_wall, 0.01));
    }

    #[test]
    fn test_push_direction_is_horizontal() {
        let near_wall = AABB::new(Vec3::new(9.0, 2.0, 4.5), Vec3::new(11.0, 4.0, 5.5));
        assert_relative_eq!(room().push_direction(&near_wall), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_constrain_keeps_box_inside_walls_and_under_ceiling() {
        let half = Vec3::new(0.5, 0.5, 0.5);
        let corrected = room().constrain(Vec3::new(-2.0, 10.0, 12.0), half);
        assert_relative_eq!(corrected, Vec3::new(0.5, 2.5, 9.5));

        // Below the floor stays below the floor
        let corrected = room().constrain(Vec3::new(5.0, -4.0, 5.0), half);
        assert_relative_eq!(corrected, Vec3::new(5.0, -4.0, 5.0));
    }

    #[test]
    fn test_descriptor_round_trip() {
        let descriptor = RoomBoundaryDescriptor::from(room());
        assert_eq!(descriptor.to_boundary().unwrap(), room());
    }
}
