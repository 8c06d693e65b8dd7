//! Bounding-box debug visualization
//!
//! [`BoundsDebugVisualizer`] mirrors every tracked box as a persistent
//! wireframe box. It hooks into the tracker as a [`BoundsObserver`], so the
//! collision code itself never manages debug geometry. Each box remembers
//! the parent of the object it mirrors so the renderer can attach it next
//! to the object.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use crate::debug::draw::{DebugDrawSystem, DebugShape};
use crate::foundation::math::{Vec3, Vec4};
use crate::physics::{BoundsObserver, ObjectId};
use crate::scene::AABB;

/// Color scheme for bounds visualization
#[derive(Clone, Debug)]
pub struct BoundsDebugColors {
    /// Boxes of objects that are clear
    pub bounds_default: Vec4,

    /// Boxes of objects currently flagged as colliding
    pub bounds_colliding: Vec4,

    /// Collision normal arrows
    pub collision_normal: Vec4,
}

impl Default for BoundsDebugColors {
    fn default() -> Self {
        Self {
            bounds_default: Vec4::new(0.0, 1.0, 0.0, 0.5),   // Green, semi-transparent
            bounds_colliding: Vec4::new(1.0, 0.0, 0.0, 0.5), // Red, semi-transparent
            collision_normal: Vec4::new(1.0, 1.0, 0.0, 1.0), // Yellow
        }
    }
}

/// Wireframe mirror of the bounds tracker
pub struct BoundsDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: BoundsDebugColors,

    /// Parent of each mirrored object
    parents: HashMap<ObjectId, Option<ObjectId>>,

    /// Objects drawn with the colliding color
    colliding: HashSet<ObjectId>,
}

impl BoundsDebugVisualizer {
    /// How long collision normal arrows stay on screen (seconds)
    pub const NORMAL_DISPLAY_TIME: f32 = 0.5;

    /// Create a new, enabled visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: BoundsDebugColors::default(),
            parents: HashMap::new(),
            colliding: HashSet::new(),
        }
    }

    /// Set custom color scheme
    #[must_use]
    pub fn with_colors(mut self, colors: BoundsDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Enable or disable drawing; disabling drops every debug box and
    /// forgets which objects were colliding
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
        if !enabled {
            self.debug_draw.clear();
            self.parents.clear();
            self.colliding.clear();
        }
    }

    /// Whether drawing is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }

    /// Switch an object's box between the default and the colliding color
    pub fn mark_colliding(&mut self, id: &ObjectId, colliding: bool) {
        if colliding {
            self.colliding.insert(id.clone());
        } else {
            self.colliding.remove(id);
        }

        let color = self.color_for(id);
        if let Some(shape) = self.debug_draw.pinned_mut(id.as_str()) {
            shape.set_color(color);
        }
    }

    /// Draw a short arrow from `origin` along a collision normal
    pub fn draw_collision_normal(&mut self, origin: Vec3, normal: Vec3) {
        self.debug_draw.draw_line(
            origin,
            origin + normal,
            self.colors.collision_normal,
            Self::NORMAL_DISPLAY_TIME,
        );
    }

    /// The debug box mirroring `id`
    pub fn box_for(&self, id: &str) -> Option<&DebugShape> {
        self.debug_draw.pinned(id)
    }

    /// The parent the debug box for `id` is attached to
    pub fn parent_of(&self, id: &str) -> Option<&ObjectId> {
        self.parents.get(id)?.as_ref()
    }

    /// Update debug system (expire temporary shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Get all debug shapes for rendering
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        self.debug_draw.get_shapes()
    }

    /// Get reference to underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }

    fn color_for(&self, id: &ObjectId) -> Vec4 {
        if self.colliding.contains(id) {
            self.colors.bounds_colliding
        } else {
            self.colors.bounds_default
        }
    }
}

impl Default for BoundsDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsObserver for BoundsDebugVisualizer {
    fn on_bounds_updated(&mut self, id: &ObjectId, bounds: &AABB, parent: Option<&ObjectId>) {
        if !self.is_enabled() {
            return;
        }

        let shape = DebugShape::Box {
            bounds: *bounds,
            color: self.color_for(id),
            wireframe: true,
        };
        self.debug_draw.pin(id, shape);
        self.parents.insert(id.clone(), parent.cloned());
    }

    fn on_bounds_removed(&mut self, id: &ObjectId) {
        self.debug_draw.unpin(id.as_str());
        self.parents.remove(id);
        self.colliding.remove(id);
    }

    fn on_cleared(&mut self) {
        self.debug_draw.clear();
        self.parents.clear();
        self.colliding.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::physics::CollisionDetector;
    use crate::scene::SceneNode;

    fn sofa() -> SceneNode {
        SceneNode::new(Transform::from_position(Vec3::new(2.0, 0.0, 3.0)))
            .with_bounds(AABB::new(Vec3::new(-1.0, 0.0, -0.5), Vec3::new(1.0, 1.0, 0.5)))
            .with_parent("scene-root")
    }

    fn detector_with_visualizer() -> CollisionDetector {
        let mut detector = CollisionDetector::new();
        detector.set_observer(Box::new(BoundsDebugVisualizer::new()));
        detector
    }

    #[test]
    fn test_box_mirrors_tracked_bounds() {
        let mut detector = detector_with_visualizer();
        detector.update_box("sofa", &sofa());

        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        match viz.box_for("sofa") {
            Some(DebugShape::Box { bounds, wireframe, .. }) => {
                assert_eq!(bounds.min, Vec3::new(1.0, 0.0, 2.5));
                assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 3.5));
                assert!(*wireframe);
            }
            other => panic!("expected a box, got {other:?}"),
        }
        assert_eq!(viz.parent_of("sofa").map(ObjectId::as_str), Some("scene-root"));
    }

    #[test]
    fn test_remove_and_clear_drop_boxes() {
        let mut detector = detector_with_visualizer();
        detector.update_box("sofa", &sofa());
        detector.update_box("chair", &sofa());
        detector.remove("sofa");

        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        assert!(viz.box_for("sofa").is_none());
        assert_eq!(viz.debug_draw().shape_count(), 1);

        detector.clear();
        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        assert_eq!(viz.debug_draw().shape_count(), 0);
    }

    #[test]
    fn test_disabling_drops_boxes_and_stops_mirroring() {
        let mut detector = detector_with_visualizer();
        detector.update_box("sofa", &sofa());

        detector.observer_mut::<BoundsDebugVisualizer>().unwrap().set_enabled(false);
        detector.update_box("chair", &sofa());

        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        assert_eq!(viz.debug_draw().shape_count(), 0);
        assert!(viz.get_shapes().is_empty());
    }

    #[test]
    fn test_colliding_color_sticks_across_updates() {
        let mut detector = detector_with_visualizer();
        detector.update_box("sofa", &sofa());

        let id = ObjectId::from("sofa");
        let red = BoundsDebugColors::default().bounds_colliding;
        detector.observer_mut::<BoundsDebugVisualizer>().unwrap().mark_colliding(&id, true);
        detector.update_box("sofa", &sofa());

        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        assert_eq!(viz.box_for("sofa").unwrap().color(), red);
    }

    #[test]
    fn test_reenabling_starts_from_default_color() {
        let colors = BoundsDebugColors {
            bounds_default: Vec4::new(0.0, 0.0, 1.0, 1.0),
            ..BoundsDebugColors::default()
        };
        let mut detector = CollisionDetector::new();
        detector.set_observer(Box::new(BoundsDebugVisualizer::new().with_colors(colors.clone())));
        detector.update_box("sofa", &sofa());

        let viz = detector.observer_mut::<BoundsDebugVisualizer>().unwrap();
        assert_eq!(viz.box_for("sofa").unwrap().color(), colors.bounds_default);
        viz.mark_colliding(&ObjectId::from("sofa"), true);
        assert_eq!(viz.box_for("sofa").unwrap().color(), colors.bounds_colliding);
        viz.set_enabled(false);
        viz.set_enabled(true);

        detector.update_box("sofa", &sofa());
        let viz = detector.observer::<BoundsDebugVisualizer>().unwrap();
        assert_eq!(viz.box_for("sofa").unwrap().color(), colors.bounds_default);
    }

    #[test]
    fn test_collision_normal_arrow_fades() {
        let mut detector = detector_with_visualizer();
        detector.set_boundary(0.0, 10.0, 0.0, 3.0, 0.0, 10.0).unwrap();
        let shelf = SceneNode::new(Transform::from_position(Vec3::new(9.8, 0.0, 5.0)))
            .with_bounds(AABB::new(Vec3::new(-0.5, 0.0, -0.2), Vec3::new(0.5, 2.0, 0.2)));
        detector.update_box("shelf", &shelf);

        let result = detector.check_room_collision("shelf");
        let normal = result.collision_normal.unwrap();
        let origin = detector.tracked_box("shelf").unwrap().center();

        let viz = detector.observer_mut::<BoundsDebugVisualizer>().unwrap();
        viz.draw_collision_normal(origin, normal);
        assert_eq!(viz.get_shapes().len(), 2);

        viz.update(BoundsDebugVisualizer::NORMAL_DISPLAY_TIME + 0.1);
        assert_eq!(viz.get_shapes().len(), 1);
    }
}
