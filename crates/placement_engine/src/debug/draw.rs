//! Immediate-mode debug geometry
//!
//! Shapes are either transient, carrying a lifetime in seconds and dropped
//! by [`DebugDrawSystem::update`] once it runs out, or pinned to an object
//! id until that object's shape is replaced or unpinned. The renderer pulls
//! everything through [`DebugDrawSystem::get_shapes`] once per frame.

use std::collections::HashMap;

use crate::foundation::math::{Vec3, Vec4};
use crate::physics::ObjectId;
use crate::scene::AABB;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment, e.g. a collision normal
    Line {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
        /// RGBA color
        color: Vec4,
    },

    /// Axis-aligned box
    Box {
        /// World-space extent of the box
        bounds: AABB,
        /// RGBA color
        color: Vec4,
        /// Draw edges only
        wireframe: bool,
    },
}

impl DebugShape {
    /// The shape's color
    pub fn color(&self) -> Vec4 {
        match self {
            Self::Line { color, .. } | Self::Box { color, .. } => *color,
        }
    }

    /// Replace the shape's color
    pub fn set_color(&mut self, new_color: Vec4) {
        match self {
            Self::Line { color, .. } | Self::Box { color, .. } => *color = new_color,
        }
    }
}

#[derive(Clone, Debug)]
struct Transient {
    shape: DebugShape,
    remaining: f32,
}

/// Collects debug shapes between frames
pub struct DebugDrawSystem {
    /// Shapes that expire on their own
    transient: Vec<Transient>,

    /// Shapes attached to a tracked object
    pinned: HashMap<ObjectId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create an enabled, empty system
    pub fn new() -> Self {
        Self {
            transient: Vec::new(),
            pinned: HashMap::new(),
            enabled: true,
        }
    }

    fn push_transient(&mut self, shape: DebugShape, seconds: f32) {
        if self.enabled {
            self.transient.push(Transient { shape, remaining: seconds });
        }
    }

    /// Draw a line segment for `seconds`
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, seconds: f32) {
        self.push_transient(DebugShape::Line { start, end, color }, seconds);
    }

    /// Draw a wireframe box for `seconds`
    pub fn draw_box(&mut self, bounds: AABB, color: Vec4, seconds: f32) {
        self.push_transient(
            DebugShape::Box {
                bounds,
                color,
                wireframe: true,
            },
            seconds,
        );
    }

    /// Attach a shape to `id`, replacing whatever was attached before
    pub fn pin(&mut self, id: &ObjectId, shape: DebugShape) {
        if self.enabled {
            self.pinned.insert(id.clone(), shape);
        }
    }

    /// Shape attached to `id`
    pub fn pinned(&self, id: &str) -> Option<&DebugShape> {
        self.pinned.get(id)
    }

    /// Shape attached to `id`, mutably
    pub fn pinned_mut(&mut self, id: &str) -> Option<&mut DebugShape> {
        self.pinned.get_mut(id)
    }

    /// Detach and return the shape attached to `id`
    pub fn unpin(&mut self, id: &str) -> Option<DebugShape> {
        self.pinned.remove(id)
    }

    /// Age transient shapes and drop the expired ones
    pub fn update(&mut self, delta_time: f32) {
        for transient in &mut self.transient {
            transient.remaining -= delta_time;
        }
        self.transient.retain(|transient| transient.remaining > 0.0);
    }

    /// Everything to render this frame
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.transient
            .iter()
            .map(|transient| &transient.shape)
            .chain(self.pinned.values())
            .collect()
    }

    /// Number of live shapes
    pub fn shape_count(&self) -> usize {
        self.transient.len() + self.pinned.len()
    }

    /// Drop every shape
    pub fn clear(&mut self) {
        self.transient.clear();
        self.pinned.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
