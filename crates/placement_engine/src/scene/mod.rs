//! Scene-side types: bounding boxes, placeable objects, and layouts

pub mod aabb;
pub mod scene_node;
pub mod layout;

pub use aabb::AABB;
pub use scene_node::{Movable, Placeable, SceneNode};
pub use layout::{LayoutItem, SceneLayout};
