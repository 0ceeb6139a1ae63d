//! # Entity — Lightweight Identifiers
//!
//! An [`Entity`] is just a number. It doesn't "contain" anything; the
//! [`World`](super::world::World) maps entities to their components through
//! the per-type packed stores, and to a [`Signature`](super::signature::Signature)
//! recording which component types are currently attached.
//!
//! ## Design: A Bounded Pool
//!
//! Entity ids come from a fixed-capacity pool (`max_entities`, 5000 by
//! default). The allocator never hands out more than that many live ids at
//! once, and running out is a capacity-planning mistake, so it panics rather
//! than returning an error.
//!
//! ```text
//! alive:     [true, false, true, false]   ← one flag per slot ever handed out
//! free_list: [3, 1]                       ← recycled slots, reused LIFO
//! len:       4                            ← next fresh index
//! capacity:  5000                         ← hard cap on live + recycled slots
//! ```
//!
//! Fresh slots are handed out lowest-first, so the first entities of a world
//! are `0, 1, 2, ...`. Once a slot is destroyed it goes on the free list and
//! is the next one reused.
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: generational indices, unbounded.
//! - **sinew**: plain indices from a bounded pool. A destroyed id is simply
//!   dead until it is handed out again; double-destroying a live id is caught
//!   by the liveness flag.

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::world::World).
///
/// Entities are created via [`World::create_entity`](super::world::World::create_entity)
/// and destroyed via [`World::destroy_entity`](super::world::World::destroy_entity).
/// The id is stable for as long as the entity is alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub(crate) u32);

impl Entity {
    /// Returns the raw slot index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages entity id allocation and recycling within a fixed capacity.
pub(crate) struct EntityAllocator {
    /// Liveness flag for each slot handed out so far. Index with `Entity::index`.
    alive: Vec<bool>,
    /// Indices of destroyed entities, available for reuse.
    free_list: Vec<u32>,
    /// Total number of slots ever handed out. Also the next fresh index.
    len: u32,
    /// Maximum number of slots this allocator will ever hand out.
    capacity: u32,
}

impl EntityAllocator {
    pub fn new(capacity: u32) -> Self {
        Self {
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            capacity,
        }
    }

    /// Allocate a new [`Entity`]. Reuses a freed slot if one is available,
    /// otherwise takes the next fresh index.
    ///
    /// # Panics
    ///
    /// Panics if every slot up to `capacity` is alive.
    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            self.alive[index as usize] = true;
            return Entity(index);
        }

        assert!(
            self.len < self.capacity,
            "Entity capacity exhausted: all {} entity ids are alive (raise `max_entities`)",
            self.capacity
        );

        let index = self.len;
        self.len += 1;
        self.alive.push(true);
        Entity(index)
    }

    /// Return an entity's slot to the free list.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn deallocate(&mut self, entity: Entity) {
        assert!(
            self.is_alive(entity),
            "Cannot destroy {:?}: it is not alive",
            entity
        );
        self.alive[entity.0 as usize] = false;
        self.free_list.push(entity.0);
    }

    /// Check if an entity handle refers to a live slot.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.0 as usize).copied().unwrap_or(false)
    }

    /// Iterate over every live entity in index order.
    pub fn iter_alive(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| Entity(index as u32))
    }

    /// Returns the number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        (self.len as usize) - self.free_list.len()
    }

    /// Returns the number of free (recyclable) slots.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Returns the total number of slots ever handed out.
    pub fn total_slots(&self) -> u32 {
        self.len
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
