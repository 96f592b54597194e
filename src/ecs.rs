//! Generational entity/component store.
//!
//! Windows and tiling forks are both plain [`Entity`] handles. Data hangs off
//! them in [`Storage`]s, and a stale handle simply stops resolving once its
//! slot is reused.

mod entity;
mod storage;
mod world;

pub use entity::{Entity, EntityAllocator};
pub use storage::{ComponentStore, Storage};
pub use world::{Tag, World};
