use std::any::TypeId;

use tracing::trace;

use super::{ComponentStore, Entity, EntityAllocator, Storage};
use crate::common::collections::{HashMap, HashSet};

/// Small per-entity markers, cheaper than a dedicated storage.
pub type Tag = u32;

/// Owns the entity allocator and tag sets, plus every storage registered for
/// cascade deletion.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    tags: Vec<HashSet<Tag>>,
    storages: Vec<Box<dyn ComponentStore>>,
    storage_index: HashMap<TypeId, usize>,
}

impl World {
    pub fn new() -> Self { Self::default() }

    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        if entity.slot() >= self.tags.len() {
            self.tags.resize_with(entity.slot() + 1, HashSet::default);
        }
        entity
    }

    /// Removes the entity from every registered storage and frees its slot.
    /// Stale handles are ignored.
    pub fn delete_entity(&mut self, entity: Entity) {
        if !self.allocator.is_alive(entity) {
            trace!(?entity, "ignoring delete of stale entity");
            return;
        }
        if let Some(tags) = self.tags.get_mut(entity.slot()) {
            tags.clear();
        }
        for storage in &mut self.storages {
            storage.remove_entity(entity);
        }
        self.allocator.deallocate(entity);
    }

    pub fn is_alive(&self, entity: Entity) -> bool { self.allocator.is_alive(entity) }

    /// Live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ { self.allocator.iter() }

    pub fn capacity(&self) -> usize { self.allocator.capacity() }

    pub fn free(&self) -> usize { self.allocator.free() }

    pub fn len(&self) -> usize { self.allocator.len() }

    pub fn is_empty(&self) -> bool { self.allocator.is_empty() }

    /// Registers the storage for component `T`. Returns `false` if one was
    /// already registered; there is exactly one storage per component type.
    pub fn register_storage<T: 'static>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        if self.storage_index.contains_key(&type_id) {
            return false;
        }
        self.storage_index.insert(type_id, self.storages.len());
        self.storages.push(Box::new(Storage::<T>::new()));
        true
    }

    pub fn storage<T: 'static>(&self) -> Option<&Storage<T>> {
        let index = *self.storage_index.get(&TypeId::of::<T>())?;
        self.storages[index].as_any().downcast_ref()
    }

    pub fn storage_mut<T: 'static>(&mut self) -> Option<&mut Storage<T>> {
        let index = *self.storage_index.get(&TypeId::of::<T>())?;
        self.storages[index].as_any_mut().downcast_mut()
    }

    /// Convenience for `storage::<T>()?.get(entity)`.
    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(entity))
    }

    pub fn tags(&self, entity: Entity) -> Option<&HashSet<Tag>> {
        if !self.is_alive(entity) {
            return None;
        }
        self.tags.get(entity.slot())
    }

    pub fn add_tag(&mut self, entity: Entity, tag: Tag) {
        if let Some(tags) = self.live_tags_mut(entity) {
            tags.insert(tag);
        }
    }

    pub fn contains_tag(&self, entity: Entity, tag: Tag) -> bool {
        self.tags(entity).is_some_and(|tags| tags.contains(&tag))
    }

    pub fn delete_tag(&mut self, entity: Entity, tag: Tag) {
        if let Some(tags) = self.live_tags_mut(entity) {
            tags.remove(&tag);
        }
    }

    fn live_tags_mut(&mut self, entity: Entity) -> Option<&mut HashSet<Tag>> {
        if !self.is_alive(entity) {
            return None;
        }
        self.tags.get_mut(entity.slot())
    }
}
