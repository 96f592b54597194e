use std::fmt;

use serde::{Deserialize, Serialize};

/// A generational handle. The generation invalidates handles issued before a
/// slot was reused; equality requires both fields to match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub fn new(index: u32, generation: u32) -> Self { Self { index, generation } }

    pub fn index(self) -> u32 { self.index }

    pub fn generation(self) -> u32 { self.generation }

    pub(crate) fn slot(self) -> usize { self.index as usize }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Issues entities and recycles freed slots.
///
/// The generation of a slot is bumped when the slot is handed out again, not
/// when it is freed. Until then a deleted entity still compares equal to its
/// slot's stored generation, but it sits on the free list so `is_alive`
/// reports false.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self { Self::default() }

    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            let generation = &mut self.generations[index as usize];
            *generation = generation.wrapping_add(1);
            Entity::new(index, *generation)
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity::new(index, 0)
        }
    }

    /// Returns the slot to the free list. Stale or already-freed handles are
    /// ignored so a slot can never be queued twice.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.free_list.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations.get(entity.slot()) == Some(&entity.generation)
            && !self.free_list.contains(&entity.index)
    }

    /// Total number of slots ever allocated.
    pub fn capacity(&self) -> usize { self.generations.len() }

    /// Number of slots waiting to be reused.
    pub fn free(&self) -> usize { self.free_list.len() }

    pub fn len(&self) -> usize { self.capacity() - self.free() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.generations
            .iter()
            .enumerate()
            .map(|(index, &generation)| Entity::new(index as u32, generation))
            .filter(|entity| !self.free_list.contains(&entity.index))
    }
}
