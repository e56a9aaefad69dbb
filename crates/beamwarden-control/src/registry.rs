//! Object registry: the ECS world holding every `TrackedObject`, indexed by
//! the id the sensing sources assign.
//!
//! Objects are addressed by id everywhere outside this module; entities
//! never leak into the followed set or the output.

use std::collections::HashMap;

use hecs::{Entity, World};

use beamwarden_core::components::TrackedObject;

#[derive(Default)]
pub struct Registry {
    world: World,
    index: HashMap<u32, Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Insert a new object. An existing object with the same id is replaced.
    pub fn spawn(&mut self, object: TrackedObject) {
        let id = object.id;
        let entity = self.world.spawn((object,));
        if let Some(old) = self.index.insert(id, entity) {
            let _ = self.world.despawn(old);
        }
    }

    pub fn get(&self, id: u32) -> Option<hecs::Ref<'_, TrackedObject>> {
        let entity = *self.index.get(&id)?;
        self.world.get::<&TrackedObject>(entity).ok()
    }

    pub fn get_mut(&mut self, id: u32) -> Option<hecs::RefMut<'_, TrackedObject>> {
        let entity = *self.index.get(&id)?;
        self.world.get::<&mut TrackedObject>(entity).ok()
    }

    /// Remove an entity collected by a system query; returns its object id.
    pub fn despawn_entity(&mut self, entity: Entity) -> Option<u32> {
        let id = self.world.get::<&TrackedObject>(entity).ok()?.id;
        self.index.remove(&id);
        let _ = self.world.despawn(entity);
        Some(id)
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Copy of every object, ordered by id.
    pub fn snapshot(&self) -> Vec<TrackedObject> {
        let mut objects: Vec<TrackedObject> = self
            .world
            .query::<&TrackedObject>()
            .iter()
            .map(|(_, obj)| obj.clone())
            .collect();
        objects.sort_by_key(|obj| obj.id);
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamwarden_core::components::{PredictionFlags, Thresholds};
    use beamwarden_core::types::Vec3;

    fn object(id: u32, x: f64) -> TrackedObject {
        TrackedObject {
            id,
            preset_priority: None,
            priority: None,
            position: Vec3::new(x, 0.0, 0.0),
            filtered_speed: Vec3::ZERO,
            raw_position: None,
            wide_position: None,
            wide_speed: Vec3::ZERO,
            entry_point: None,
            near_point: None,
            meet_point: None,
            wide_count: 0,
            narrow_count: 0,
            thresholds: Thresholds {
                wide: 1,
                narrow: 20,
                approx_narrow: 5,
            },
            needs: PredictionFlags::default(),
            intercept_committed: false,
            last_update_ms: 0.0,
            last_narrow_ms: 0.0,
            death_timeout_ms: 3_000.0,
        }
    }

    #[test]
    fn test_spawn_replaces_same_id() {
        let mut registry = Registry::new();
        registry.spawn(object(4, 1.0));
        registry.spawn(object(4, 2.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.world_mut().len(), 1);
        assert_eq!(registry.get(4).unwrap().position.x, 2.0);
    }

    #[test]
    fn test_snapshot_sorted_and_despawn_by_entity() {
        let mut registry = Registry::new();
        for id in [9, 2, 5] {
            registry.spawn(object(id, id as f64));
        }
        let ids: Vec<u32> = registry.snapshot().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);

        let entity = registry
            .world_mut()
            .query_mut::<&TrackedObject>()
            .into_iter()
            .find(|(_, obj)| obj.id == 5)
            .map(|(e, _)| e)
            .unwrap();
        assert_eq!(registry.despawn_entity(entity), Some(5));
        assert!(!registry.contains(5));
        assert!(registry.contains(2));
        assert!(registry.get_mut(5).is_none());
    }
}
