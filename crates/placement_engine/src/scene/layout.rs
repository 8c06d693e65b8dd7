//! Scene layout descriptions
//!
//! A layout is a room descriptor plus the items placed in it, loaded from
//! TOML or RON through the [`Config`] trait. The layout checker and scenario
//! tests build their scenes from it.

use serde::{Serialize, Deserialize};

use crate::config::{float, Config};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::RoomBoundaryDescriptor;
use super::{AABB, SceneNode};

fn default_scale() -> f32 {
    1.0
}

/// One placed catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// Stable id used as the tracking key
    pub id: String,
    /// Human-readable name used in collision reports
    pub name: String,
    /// World position of the item's base center
    #[serde(serialize_with = "float::vec3")]
    pub position: Vec3,
    /// Model size (width, height, depth) before scaling
    #[serde(serialize_with = "float::vec3")]
    pub size: Vec3,
    /// Rotation around the vertical axis in radians
    #[serde(default, serialize_with = "float::f32")]
    pub yaw: f32,
    /// Uniform scale factor
    #[serde(default = "default_scale", serialize_with = "float::f32")]
    pub scale: f32,
}

impl LayoutItem {
    /// Build the scene node for this item
    ///
    /// Models are normalized so their lowest point sits at the node origin,
    /// so the local box spans `[0, height]` vertically and is centered on X/Z.
    pub fn to_node(&self) -> SceneNode {
        let half = Vec3::new(self.size.x * 0.5, 0.0, self.size.z * 0.5);
        let local = AABB::new(-half, Vec3::new(half.x, self.size.y, half.z));
        SceneNode::new(
            Transform::from_position(self.position)
                .with_yaw(self.yaw)
                .with_uniform_scale(self.scale),
        )
        .with_bounds(local)
    }
}

/// A room and the items placed in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    /// Room boundary from the spatial data source
    pub room: Option<RoomBoundaryDescriptor>,
    /// Placed items, in placement order
    pub items: Vec<LayoutItem>,
}

impl Config for SceneLayout {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::scene::Placeable;
    use approx::assert_relative_eq;

    const LAYOUT: &str = r#"
        [room]
        min_x = 0.0
        max_x = 10.0
        min_y = 0.0
        max_y = 3.0
        min_z = 0.0
        max_z = 10.0

        [[items]]
        id = "sofa-0"
        name = "Sofa"
        position = [4.5, 0.0, 4.5]
        size = [1.0, 1.0, 1.0]

        [[items]]
        id = "shelf-1"
        name = "Shelf"
        position = [1.0, 0.0, 1.0]
        size = [2.0, 2.0, 0.5]
        yaw = 1.5707964
        scale = 0.5
    "#;

    #[test]
    fn test_layout_parses_from_toml() {
        let layout = SceneLayout::from_str_as(LAYOUT, ConfigFormat::Toml).unwrap();
        let room = layout.room.unwrap();
        assert_eq!(room.max_x, 10.0);
        assert_eq!(layout.items.len(), 2);
        assert_eq!(layout.items[0].scale, 1.0);
        assert_eq!(layout.items[0].yaw, 0.0);
    }

    #[test]
    fn test_item_node_sits_on_its_position() {
        let layout = SceneLayout::from_str_as(LAYOUT, ConfigFormat::Toml).unwrap();

        let sofa = layout.items[0].to_node().world_bounds().unwrap();
        assert_relative_eq!(sofa.min, Vec3::new(4.0, 0.0, 4.0), epsilon = 1e-5);
        assert_relative_eq!(sofa.max, Vec3::new(5.0, 1.0, 5.0), epsilon = 1e-5);

        // Half scale, rotated a quarter turn: 0.25 wide on X, 1.0 deep on Z, 1.0 tall
        let shelf = layout.items[1].to_node().world_bounds().unwrap();
        assert_relative_eq!(shelf.size(), Vec3::new(0.25, 1.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(shelf.center(), Vec3::new(1.0, 0.5, 1.0), epsilon = 1e-5);
    }

    fn measured_layout() -> SceneLayout {
        SceneLayout {
            room: Some(RoomBoundaryDescriptor {
                min_x: 0.0,
                max_x: 6.1,
                min_y: 0.0,
                max_y: 2.7,
                min_z: -0.3,
                max_z: 4.9,
            }),
            items: vec![LayoutItem {
                id: "lamp-0".to_string(),
                name: "Floor Lamp".to_string(),
                position: Vec3::new(0.3, 0.0, 1.1),
                size: Vec3::new(0.4, 1.7, 0.4),
                yaw: 0.2,
                scale: 1.0,
            }],
        }
    }

    #[test]
    fn test_layout_survives_save_and_load() {
        let dir = std::env::temp_dir().join(format!("placement-layout-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let layout = measured_layout();

        for file in ["room.toml", "room.ron"] {
            let path = dir.join(file);
            layout.save_to_file(&path).unwrap();
            let loaded = SceneLayout::load_from_file(&path).unwrap();
            assert_eq!(loaded.room, layout.room, "{file}");
            assert_eq!(loaded.items, layout.items, "{file}");
        }

        assert!(matches!(
            layout.save_to_file(dir.join("room.json")),
            Err(crate::config::ConfigError::UnsupportedFormat(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_saved_values_keep_their_written_digits() {
        let layout = measured_layout();

        let toml = layout.to_string_as(ConfigFormat::Toml).unwrap();
        assert!(toml.contains("max_y = 2.7\n"), "{toml}");
        assert!(toml.contains("yaw = 0.2\n"), "{toml}");
        assert!(!toml.contains("0000000"), "{toml}");

        let ron = layout.to_string_as(ConfigFormat::Ron).unwrap();
        assert!(ron.contains("max_y: 2.7,"), "{ron}");
        assert!(!ron.contains("0000000"), "{ron}");
    }
}
