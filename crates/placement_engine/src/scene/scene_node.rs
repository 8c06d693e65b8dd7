//! Scene nodes and the [`Placeable`] abstraction
//!
//! The collision engine never sees a renderer's scene graph directly. It
//! only needs an object's position and the world-space box around the object
//! and everything attached below it, which is what [`Placeable`] exposes.
//! [`SceneNode`] is a minimal hierarchical implementation used by the drag
//! controller, the layout checker, and tests.

use crate::foundation::math::{Mat4, Vec3, Transform};
use crate::physics::ObjectId;
use super::aabb::AABB;

/// An object that can be tracked and moved by the placement engine
pub trait Placeable {
    /// Current world-space position of the object's origin
    fn position(&self) -> Vec3;

    /// World-space AABB enclosing the object and all of its descendants
    ///
    /// Returns `None` when nothing in the hierarchy has geometry.
    fn world_bounds(&self) -> Option<AABB>;

    /// Id of the node this object is attached to, if any
    ///
    /// Debug visualizers attach their helper shapes to the same parent.
    fn parent_id(&self) -> Option<&ObjectId> {
        None
    }
}

/// A placeable object the drag controller can move and turn
pub trait Movable: Placeable {
    /// Move the object's origin to a world position
    fn set_position(&mut self, position: Vec3);

    /// Turn the object around the vertical axis by `delta` radians
    fn rotate_yaw(&mut self, delta: f32);
}

/// A node in a minimal scene hierarchy
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Transform relative to the parent (world transform for root nodes)
    pub transform: Transform,
    /// Model-space bounds of this node's own mesh, if it has one
    pub local_bounds: Option<AABB>,
    /// Attached child nodes
    pub children: Vec<SceneNode>,
    /// Id of the node this one is attached to
    pub parent: Option<ObjectId>,
}

impl SceneNode {
    /// Create a node without geometry
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }

    /// Give this node mesh bounds in model space
    #[must_use]
    pub fn with_bounds(mut self, bounds: AABB) -> Self {
        self.local_bounds = Some(bounds);
        self
    }

    /// Attach a child node
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Record the id of the node this one hangs off
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ObjectId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    fn accumulate_bounds(&self, parent_matrix: &Mat4, acc: &mut Option<AABB>) {
        let world = parent_matrix * self.transform.to_matrix();

        if let Some(local) = &self.local_bounds {
            let bounds = local.transformed(&world);
            *acc = Some(acc.map_or(bounds, |existing| existing.union(&bounds)));
        }

        for child in &self.children {
            child.accumulate_bounds(&world, acc);
        }
    }
}

impl Placeable for SceneNode {
    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn world_bounds(&self) -> Option<AABB> {
        let mut bounds = None;
        self.accumulate_bounds(&Mat4::identity(), &mut bounds);
        bounds
    }

    fn parent_id(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }
}

impl Movable for SceneNode {
    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn rotate_yaw(&mut self, delta: f32) {
        self.transform.rotate_yaw(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_node_has_no_bounds() {
        let node = SceneNode::new(Transform::from_position(Vec3::new(1.0, 0.0, 1.0)))
            .with_child(SceneNode::default());
        assert!(node.world_bounds().is_none());
    }

    #[test]
    fn test_bounds_include_descendants() {
        // Table top with a lamp sitting on it, offset in the table's local space
        let lamp = SceneNode::new(Transform::from_position(Vec3::new(0.5, 1.0, 0.0)))
            .with_bounds(AABB::new(Vec3::new(-0.1, 0.0, -0.1), Vec3::new(0.1, 0.5, 0.1)));
        let table = SceneNode::new(Transform::from_position(Vec3::new(3.0, 0.0, 2.0)))
            .with_bounds(AABB::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5)))
            .with_child(lamp);

        let bounds = table.world_bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(2.5, 0.0, 1.5), epsilon = 1e-5);
        assert_relative_eq!(bounds.max, Vec3::new(3.6, 1.5, 2.5), epsilon = 1e-5);
    }

    #[test]
    fn test_scale_applies_to_children() {
        let child = SceneNode::new(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .with_bounds(AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
        let root = SceneNode::new(Transform::identity().with_uniform_scale(2.0)).with_child(child);

        let bounds = root.world_bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.max, Vec3::new(4.0, 2.0, 2.0), epsilon = 1e-5);
    }
}
