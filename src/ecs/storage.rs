use std::any::Any;

use super::Entity;

/// Anything the [`World`](super::World) can purge an entity from when that
/// entity is deleted.
pub trait ComponentStore: Any {
    fn remove_entity(&mut self, entity: Entity);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Sparse, generation-checked map from entity to component.
///
/// Slot `i` belongs to entity index `i`. A lookup only succeeds when the
/// generation stored alongside the value matches the handle's generation.
#[derive(Debug, Clone)]
pub struct Storage<T> {
    slots: Vec<Option<(u32, T)>>,
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self { slots: Vec::new() } }
}

impl<T> Storage<T> {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self.slots.get(entity.slot()) {
            Some(Some((generation, value))) if *generation == entity.generation() => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.slots.get_mut(entity.slot()) {
            Some(Some((generation, value))) if *generation == entity.generation() => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool { self.get(entity).is_some() }

    /// Assigns `value` to `entity`, returning whatever the same entity held
    /// before. A value left behind by an older generation is dropped.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let slot = entity.slot();
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }
        match self.slots[slot].replace((entity.generation(), value)) {
            Some((generation, old)) if generation == entity.generation() => Some(old),
            _ => None,
        }
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        if !self.contains(entity) {
            return None;
        }
        self.slots[entity.slot()].take().map(|(_, value)| value)
    }

    pub fn get_or_insert_with(&mut self, entity: Entity, init: impl FnOnce() -> T) -> &mut T {
        let slot = entity.slot();
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }
        let generation = entity.generation();
        let entry = &mut self.slots[slot];
        if !matches!(entry, Some((stored, _)) if *stored == generation) {
            *entry = None;
        }
        &mut entry.get_or_insert_with(|| (generation, init())).1
    }

    /// Applies `f` to the component when it exists.
    pub fn with<R>(&mut self, entity: Entity, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.get_mut(entity).map(f)
    }

    /// Removes the component and hands it to `f`.
    pub fn take_with<R>(&mut self, entity: Entity, f: impl FnOnce(T) -> R) -> Option<R> {
        self.remove(entity).map(f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|(generation, value)| (Entity::new(index as u32, *generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            slot.as_mut()
                .map(|(generation, value)| (Entity::new(index as u32, *generation), value))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> { self.iter().map(|(_, value)| value) }

    /// Entities whose component satisfies `predicate`, in slot order.
    pub fn find<'a>(
        &'a self,
        mut predicate: impl FnMut(&T) -> bool + 'a,
    ) -> impl Iterator<Item = Entity> + 'a {
        self.iter().filter(move |(_, value)| predicate(value)).map(|(entity, _)| entity)
    }

    pub fn len(&self) -> usize { self.slots.iter().filter(|slot| slot.is_some()).count() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<T: 'static> ComponentStore for Storage<T> {
    fn remove_entity(&mut self, entity: Entity) { self.remove(entity); }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}
