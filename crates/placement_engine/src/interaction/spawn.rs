//! Where newly added catalog items appear

use crate::foundation::math::Vec3;
use crate::physics::RoomBoundary;

/// Distance in front of the viewer at which new items are placed
pub const SPAWN_DISTANCE: f32 = 2.0;

/// Spawn point for a new item: in front of the viewer, on the floor
///
/// When a room is known and the point falls outside it, the point is
/// clamped into the room box.
pub fn spawn_position(
    camera_position: Vec3,
    camera_forward: Vec3,
    floor_height: f32,
    room: Option<&RoomBoundary>,
) -> Vec3 {
    let mut position = camera_position + camera_forward * SPAWN_DISTANCE;
    position.y = floor_height;

    match room {
        Some(room) if !room.contains_point(position) => {
            let clamped = room.clamp_point(position);
            log::debug!("Spawn point {:?} outside the room, clamped to {:?}", position, clamped);
            clamped
        }
        _ => position,
    }
}
