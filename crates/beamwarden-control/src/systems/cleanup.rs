//! Cleanup system: removes objects that went silent.

use hecs::Entity;
use tracing::debug;

use beamwarden_core::components::TrackedObject;

use crate::registry::Registry;

/// Remove objects not updated for their death timeout and scrub them from
/// the followed set. Uses a pre-allocated buffer to avoid per-tick
/// allocation.
pub fn run(
    registry: &mut Registry,
    followed: &mut Vec<u32>,
    now_ms: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, obj) in registry.world_mut().query_mut::<&TrackedObject>() {
        if obj.is_dead(now_ms) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Some(id) = registry.despawn_entity(entity) {
            followed.retain(|&f| f != id);
            debug!(id, "object expired");
        }
    }
}
