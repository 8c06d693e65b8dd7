//! Math utilities and types
//!
//! Provides the fundamental math types used by placement and collision code.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set a rotation around the vertical axis (radians)
    #[must_use]
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&Vec3::y_axis(), yaw);
        self
    }

    /// Set a uniform scale factor
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Rotate around the vertical axis by `delta` radians, keeping any existing rotation
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.rotation = Quat::from_axis_angle(&Vec3::y_axis(), delta) * self.rotation;
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Project a vector onto the horizontal (XZ) plane and normalize it
///
/// Returns the zero vector when nothing is left after dropping the Y component.
pub fn horizontal_direction(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::zeros)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_point_applies_trs() {
        let transform = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_yaw(constants::PI * 0.5)
            .with_uniform_scale(2.0);

        // Scale to (2,0,0), yaw 90 degrees maps +X to -Z, then translate
        let p = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(1.0, 0.0, -2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_yaw_accumulates() {
        let mut transform = Transform::identity();
        transform.rotate_yaw(0.25);
        transform.rotate_yaw(0.5);

        let expected = Quat::from_axis_angle(&Vec3::y_axis(), 0.75);
        assert_relative_eq!(transform.rotation, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_horizontal_direction_drops_y() {
        let dir = horizontal_direction(Vec3::new(3.0, 10.0, 4.0));
        assert_relative_eq!(dir, Vec3::new(0.6, 0.0, 0.8), epsilon = EPSILON);

        assert_eq!(horizontal_direction(Vec3::new(0.0, 5.0, 0.0)), Vec3::zeros());
    }
}
