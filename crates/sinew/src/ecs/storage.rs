//! # Storage — Packed Per-Type Component Arrays
//!
//! Each registered component type gets exactly one [`PackedStore<T>`]: a
//! dense `Vec<T>` plus a two-way mapping between entities and slots.
//!
//! ```text
//! dense:            [ c0 ][ c1 ][ c2 ]        ← no holes, len == 3
//! index_to_entity:  [ e7 ][ e2 ][ e4 ]
//! entity_to_index:  { e7: 0, e2: 1, e4: 2 }
//! ```
//!
//! ## Swap-Remove
//!
//! Removing an entity moves the last occupant into the freed slot and shrinks
//! the array by one. This keeps the array dense and makes removal O(1) without
//! scanning, at the cost of iteration order:
//!
//! ```text
//! remove(e7):
//! dense:            [ c2 ][ c1 ]
//! index_to_entity:  [ e4 ][ e2 ]
//! entity_to_index:  { e4: 0, e2: 1 }
//! ```
//!
//! ## Type Erasure
//!
//! The world holds stores for many component types side by side, so each
//! store sits behind the [`ComponentStore`] trait and is downcast back to
//! `PackedStore<T>` when the caller names `T`. Entity destruction only needs
//! the erased `on_entity_destroyed` hook, since the destroying code does not
//! know which component types the entity had.
//!
//! ## Comparison
//!
//! - **EnTT / sparse-set ECSs**: same dense array + index map idea, with a
//!   paged sparse array instead of a hash map.
//! - **sinew**: `HashMap<Entity, usize>` one way, `Vec<Entity>` the other.
//!   No unsafe code.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::Entity;
use super::signature::ComponentId;

/// Type-erased view of a [`PackedStore`].
pub trait ComponentStore: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Drop `entity`'s slot if it has one. Never panics.
    fn on_entity_destroyed(&mut self, entity: Entity);
    fn contains(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
}

/// Dense storage for every `T` attached to some entity.
pub struct PackedStore<T> {
    dense: Vec<T>,
    index_to_entity: Vec<Entity>,
    entity_to_index: HashMap<Entity, usize>,
}

impl<T: 'static> PackedStore<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            index_to_entity: Vec::new(),
            entity_to_index: HashMap::new(),
        }
    }

    /// Append `value` for `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` already has a slot in this store.
    pub fn insert(&mut self, entity: Entity, value: T) {
        assert!(
            !self.entity_to_index.contains_key(&entity),
            "Component `{}` added to {:?} more than once",
            std::any::type_name::<T>(),
            entity
        );

        let index = self.dense.len();
        self.dense.push(value);
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, index);
    }

    /// Swap-remove `entity`'s slot and return its value.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no slot in this store.
    pub fn remove(&mut self, entity: Entity) -> T {
        let index = self.entity_to_index.remove(&entity).unwrap_or_else(|| {
            panic!(
                "Removing non-existent component `{}` from {:?}",
                std::any::type_name::<T>(),
                entity
            )
        });

        let value = self.dense.swap_remove(index);
        self.index_to_entity.swap_remove(index);

        // The former last occupant now lives at `index`.
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }

        value
    }

    /// Get `entity`'s component.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no slot in this store.
    pub fn get(&self, entity: Entity) -> &T {
        self.try_get(entity).unwrap_or_else(|| {
            panic!(
                "Retrieving non-existent component `{}` for {:?}",
                std::any::type_name::<T>(),
                entity
            )
        })
    }

    /// Mutable variant of [`get`](Self::get).
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no slot in this store.
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        self.try_get_mut(entity).unwrap_or_else(|| {
            panic!(
                "Retrieving non-existent component `{}` for {:?}",
                std::any::type_name::<T>(),
                entity
            )
        })
    }

    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        let index = *self.entity_to_index.get(&entity)?;
        Some(&self.dense[index])
    }

    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = *self.entity_to_index.get(&entity)?;
        Some(&mut self.dense[index])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Entities in dense order. `entities()[i]` owns `iter()`'s i-th value.
    pub fn entities(&self) -> &[Entity] {
        &self.index_to_entity
    }

    /// `(entity, &value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.index_to_entity.iter().copied().zip(self.dense.iter())
    }

    /// Dense slot index of `entity`, if it has one.
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.entity_to_index.get(&entity).copied()
    }
}

impl<T: 'static> Default for PackedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ComponentStore for PackedStore<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_entity_destroyed(&mut self, entity: Entity) {
        if self.contains(entity) {
            self.remove(entity);
        }
    }

    fn contains(&self, entity: Entity) -> bool {
        PackedStore::contains(self, entity)
    }

    fn len(&self) -> usize {
        PackedStore::len(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Every registered component type, its [`ComponentId`], and its store.
///
/// `stores[id]` is the store for the component registered as `id`.
pub(crate) struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
    stores: Vec<Box<dyn ComponentStore>>,
    limit: usize,
}

impl ComponentRegistry {
    pub fn new(limit: usize) -> Self {
        Self {
            ids: HashMap::new(),
            stores: Vec::new(),
            limit,
        }
    }

    /// Mint the next id for `T` and create its store.
    ///
    /// # Panics
    ///
    /// Panics if `T` is already registered or the component limit is reached.
    pub fn register<T: 'static>(&mut self) -> ComponentId {
        let type_id = TypeId::of::<T>();
        assert!(
            !self.ids.contains_key(&type_id),
            "Registering component type `{}` more than once",
            std::any::type_name::<T>()
        );
        assert!(
            self.stores.len() < self.limit,
            "Cannot register component `{}`: the limit of {} component types is reached",
            std::any::type_name::<T>(),
            self.limit
        );

        let id = ComponentId(self.stores.len() as u8);
        self.ids.insert(type_id, id);
        self.stores.push(Box::new(PackedStore::<T>::new()));
        id
    }

    pub fn id_of(&self, type_id: &TypeId) -> Option<ComponentId> {
        self.ids.get(type_id).copied()
    }

    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn expect_id<T: 'static>(&self) -> ComponentId {
        self.id_of(&TypeId::of::<T>()).unwrap_or_else(|| {
            panic!(
                "Component `{}` not registered before use",
                std::any::type_name::<T>()
            )
        })
    }

    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn store<T: 'static>(&self) -> &PackedStore<T> {
        let id = self.expect_id::<T>();
        self.stores[id.index()]
            .as_any()
            .downcast_ref::<PackedStore<T>>()
            .unwrap_or_else(|| {
                panic!(
                    "Store type mismatch for component `{}`",
                    std::any::type_name::<T>()
                )
            })
    }

    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn store_mut<T: 'static>(&mut self) -> &mut PackedStore<T> {
        let id = self.expect_id::<T>();
        self.stores[id.index()]
            .as_any_mut()
            .downcast_mut::<PackedStore<T>>()
            .unwrap_or_else(|| {
                panic!(
                    "Store type mismatch for component `{}`",
                    std::any::type_name::<T>()
                )
            })
    }

    pub fn stores(&self) -> impl Iterator<Item = &dyn ComponentStore> {
        self.stores.iter().map(|s| s.as_ref())
    }

    pub fn stores_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ComponentStore>> {
        self.stores.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }
}
