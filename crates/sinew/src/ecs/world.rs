//! # World — The Central Container
//!
//! The [`World`] owns every piece of ECS state: the entity pool and its
//! signatures, one packed store per component type, the system registry, the
//! schedules, the installed plugins, and the resources. There is no global
//! state; two worlds are fully independent, and dropping a world tears
//! everything down.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ World                                                     │
//! │                                                           │
//! │  allocator:  bounded entity id pool                       │
//! │  signatures: Vec<Signature>  (indexed by entity id)       │
//! │                                                           │
//! │  components: TypeId → ComponentId                         │
//! │              stores[ComponentId] = PackedStore<T>         │
//! │                                                           │
//! │  systems:    slots in registration order                  │
//! │              { behaviour, signature, schedule, entities } │
//! │                                                           │
//! │  schedules:  TypeId → ScheduleId   (Setup = 0, Update = 1)│
//! │  plugins:    installed plugin types                       │
//! │  resources:  TypeId → Box<dyn Any>                        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Matching
//!
//! Every signature change (attach, detach, create) goes through one choke
//! point that re-tests the entity against *every* system and inserts it into
//! or erases it from that system's matching set. This happens synchronously,
//! so after any call returns each system's set is exactly the live entities
//! whose signature is a superset of the system's requirement.
//!
//! ## Errors
//!
//! Misuse is a programming error, not a runtime condition: registering
//! anything twice, touching an unregistered type, operating on a dead entity,
//! or running out of capacity all panic with a message naming the offending
//! type or entity. The `try_*` accessors are the tolerant path.

use std::any::TypeId;

use log::{debug, trace};

use super::entity::{Entity, EntityAllocator};
use super::plugin::{Plugin, Plugins};
use super::resource::Resources;
use super::schedule::{ScheduleId, ScheduleLabel, Schedules};
use super::signature::{ComponentId, ComponentSet, Signature};
use super::storage::{ComponentRegistry, PackedStore};
use super::system::{System, SystemId, SystemRegistry};
use crate::config::WorldConfig;

/// The central container for all ECS state.
pub struct World {
    config: WorldConfig,
    allocator: EntityAllocator,
    /// Signature of every slot ever handed out. Dead slots hold the empty signature.
    signatures: Vec<Signature>,
    pub(crate) components: ComponentRegistry,
    pub(crate) systems: SystemRegistry,
    pub(crate) schedules: Schedules,
    pub(crate) plugins: Plugins,
    pub(crate) resources: Resources,
}

impl World {
    /// Create a world with the default [`WorldConfig`].
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        debug!(
            "creating world: max_entities = {}, max_components = {}",
            config.max_entities, config.max_components
        );
        Self {
            allocator: EntityAllocator::new(config.max_entities),
            signatures: Vec::new(),
            components: ComponentRegistry::new(config.component_limit()),
            systems: SystemRegistry::new(),
            schedules: Schedules::new(),
            plugins: Plugins::new(),
            resources: Resources::new(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Create an entity with no components.
    ///
    /// The new entity immediately joins every system with an empty
    /// requirement.
    ///
    /// # Panics
    ///
    /// Panics if `max_entities` entities are already alive.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        let index = entity.index() as usize;
        if index >= self.signatures.len() {
            self.signatures.resize(index + 1, Signature::EMPTY);
        }
        self.set_signature(entity, Signature::EMPTY);
        trace!("created {:?}", entity);
        entity
    }

    /// Destroy an entity: clear its signature, erase it from every system,
    /// drop its components, and return its id to the pool.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot destroy dead entity {:?}",
            entity
        );

        self.signatures[entity.index() as usize] = Signature::EMPTY;
        for slot in self.systems.iter_mut() {
            slot.entities.remove(&entity);
        }
        for store in self.components.stores_mut() {
            store.on_entity_destroyed(entity);
        }
        self.allocator.deallocate(entity);
        trace!("destroyed {:?}", entity);
    }

    /// Destroy every live entity. Registrations and resources are untouched.
    pub fn destroy_all_entities(&mut self) {
        let alive: Vec<Entity> = self.allocator.iter_alive().collect();
        debug!("destroying all {} entities", alive.len());
        for entity in alive {
            self.destroy_entity(entity);
        }
    }

    /// Returns the number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Check if an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Every live entity, in id order.
    pub fn entities(&self) -> Vec<Entity> {
        self.allocator.iter_alive().collect()
    }

    /// The set of component types currently attached to `entity`.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn get_signature(&self, entity: Entity) -> Signature {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot read signature of dead entity {:?}",
            entity
        );
        self.signatures[entity.index() as usize]
    }

    /// Store `signature` for `entity` and re-test the entity against every
    /// system before returning.
    pub(crate) fn set_signature(&mut self, entity: Entity, signature: Signature) {
        self.signatures[entity.index() as usize] = signature;
        for slot in self.systems.iter_mut() {
            slot.rematch(entity, &signature);
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Register component type `T`, creating its packed store.
    ///
    /// # Panics
    ///
    /// Panics if `T` is already registered or the component limit is reached.
    pub fn register_component<T: 'static>(&mut self) -> ComponentId {
        let id = self.components.register::<T>();
        debug!(
            "registered component `{}` as {:?}",
            std::any::type_name::<T>(),
            id
        );
        id
    }

    /// The id minted for `T`, if registered.
    pub fn component_id<T: 'static>(&self) -> Option<ComponentId> {
        self.components.id_of(&TypeId::of::<T>())
    }

    /// Attach a default-constructed `T` and return it for filling in.
    ///
    /// # Panics
    ///
    /// Panics if the entity is dead, `T` is unregistered, or the entity
    /// already has a `T`.
    pub fn add_component<T: Default + 'static>(&mut self, entity: Entity) -> &mut T {
        self.insert_component(entity, T::default())
    }

    /// Attach `value` to `entity` and return it.
    ///
    /// # Panics
    ///
    /// Panics if the entity is dead, `T` is unregistered, or the entity
    /// already has a `T`.
    pub fn insert_component<T: 'static>(&mut self, entity: Entity, value: T) -> &mut T {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot insert component `{}` on dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );

        let id = self.components.expect_id::<T>();
        self.components.store_mut::<T>().insert(entity, value);

        let mut signature = self.signatures[entity.index() as usize];
        signature.set(id);
        self.set_signature(entity, signature);

        self.components.store_mut::<T>().get_mut(entity)
    }

    /// Detach `T` from `entity` and return the value.
    ///
    /// # Panics
    ///
    /// Panics if the entity is dead, `T` is unregistered, or the entity has no `T`.
    pub fn remove_component<T: 'static>(&mut self, entity: Entity) -> T {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot remove component `{}` from dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );

        let id = self.components.expect_id::<T>();
        let value = self.components.store_mut::<T>().remove(entity);

        let mut signature = self.signatures[entity.index() as usize];
        signature.clear(id);
        self.set_signature(entity, signature);

        value
    }

    /// Get a shared reference to `entity`'s `T`.
    ///
    /// The borrow keeps the world from being mutated, so it can never observe
    /// a slot that a later insert or remove relocated.
    ///
    /// # Panics
    ///
    /// Panics if the entity is dead, `T` is unregistered, or the entity has no `T`.
    pub fn get_component<T: 'static>(&self, entity: Entity) -> &T {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot get component `{}` of dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );
        self.components.store::<T>().get(entity)
    }

    /// Mutable variant of [`get_component`](Self::get_component).
    ///
    /// # Panics
    ///
    /// Panics if the entity is dead, `T` is unregistered, or the entity has no `T`.
    pub fn get_component_mut<T: 'static>(&mut self, entity: Entity) -> &mut T {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot get component `{}` of dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );
        self.components.store_mut::<T>().get_mut(entity)
    }

    /// Returns `None` if the entity is dead or has no `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unregistered.
    pub fn try_component<T: 'static>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.components.store::<T>().try_get(entity)
    }

    /// Returns `None` if the entity is dead or has no `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unregistered.
    pub fn try_component_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.components.store_mut::<T>().try_get_mut(entity)
    }

    /// Check the entity's signature for `T`. Dead entities and unregistered
    /// types have nothing attached.
    pub fn has_component<T: 'static>(&self, entity: Entity) -> bool {
        match self.component_id::<T>() {
            Some(id) if self.allocator.is_alive(entity) => {
                self.signatures[entity.index() as usize].contains(id)
            }
            _ => false,
        }
    }

    /// Read-only view of `T`'s packed store, for iteration.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unregistered.
    pub fn components<T: 'static>(&self) -> &PackedStore<T> {
        self.components.store::<T>()
    }

    /// Number of entities with a `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unregistered.
    pub fn component_count<T: 'static>(&self) -> usize {
        self.components.store::<T>().len()
    }

    /// Number of registered component types.
    pub fn component_type_count(&self) -> usize {
        self.components.len()
    }

    /// Resolve a [`ComponentSet`] to a signature.
    ///
    /// # Panics
    ///
    /// Panics if any member type is unregistered.
    pub fn signature_of<C: ComponentSet>(&self) -> Signature {
        C::type_ids()
            .into_iter()
            .fold(Signature::EMPTY, |signature, (type_id, name)| {
                let id = self.components.id_of(&type_id).unwrap_or_else(|| {
                    panic!("Component `{}` not registered before use", name)
                });
                signature.with(id)
            })
    }

    // ── Systems ──────────────────────────────────────────────────────

    /// Register a default-constructed `S` requiring the components in `C`.
    ///
    /// ```ignore
    /// world.add_system::<PrintColor, (Color,)>();
    /// world.add_system::<AdvanceClock, ()>();
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `S` is already registered or a member of `C` is unregistered.
    pub fn add_system<S, C>(&mut self) -> SystemId
    where
        S: System + Default + 'static,
        C: ComponentSet,
    {
        self.add_system_with::<S, C>(S::default())
    }

    /// Register `system` requiring the components in `C`. It starts in the
    /// [`Update`](super::schedule::Update) schedule, and its matching set is
    /// seeded with the entities that already qualify.
    ///
    /// # Panics
    ///
    /// Panics if `S` is already registered or a member of `C` is unregistered.
    pub fn add_system_with<S, C>(&mut self, system: S) -> SystemId
    where
        S: System + 'static,
        C: ComponentSet,
    {
        let signature = self.signature_of::<C>();
        let id = self
            .systems
            .register(system, signature, ScheduleId::UPDATE);

        if let Some(slot) = self.systems.get_mut(id) {
            for entity in self.allocator.iter_alive() {
                slot.rematch(entity, &self.signatures[entity.index() as usize]);
            }
            debug!(
                "added system `{}` requiring {:?}, {} entities matched",
                slot.name,
                signature,
                slot.entities.len()
            );
        }
        id
    }

    /// Remove system `S`. Its slot is vacated, never reused, and skipped by
    /// the scheduler from now on.
    ///
    /// # Panics
    ///
    /// Panics if `S` is not registered.
    pub fn remove_system<S: System + 'static>(&mut self) {
        let id = self.expect_system_id::<S>();
        self.remove_system_by_id(id);
    }

    /// Remove a system by its handle. Useful for closure systems, whose type
    /// cannot be named.
    ///
    /// # Panics
    ///
    /// Panics if the system is not registered.
    pub fn remove_system_by_id(&mut self, id: SystemId) {
        let slot = self.systems.vacate(id);
        debug!("removed system `{}`", slot.name);
    }

    /// Move system `S` to schedule `Sched`.
    ///
    /// # Panics
    ///
    /// Panics if `S` or `Sched` is not registered.
    pub fn change_system_schedule<S: System + 'static, Sched: ScheduleLabel>(&mut self) {
        let id = self.expect_system_id::<S>();
        let schedule = self.schedules.id::<Sched>();
        if let Some(slot) = self.systems.get_mut(id) {
            slot.schedule = schedule;
            debug!(
                "system `{}` moved to schedule `{}`",
                slot.name,
                self.schedules.name(schedule)
            );
        }
    }

    pub fn system_id<S: System + 'static>(&self) -> Option<SystemId> {
        self.systems.id_of(&TypeId::of::<S>())
    }

    pub fn has_system<S: System + 'static>(&self) -> bool {
        self.system_id::<S>().is_some()
    }

    /// Number of registered (not removed) systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Snapshot of `S`'s matching set.
    ///
    /// # Panics
    ///
    /// Panics if `S` is not registered.
    pub fn system_entities<S: System + 'static>(&self) -> Vec<Entity> {
        let id = self.expect_system_id::<S>();
        self.systems
            .get(id)
            .map(|slot| slot.entities.iter().copied().collect())
            .unwrap_or_default()
    }

    fn expect_system_id<S: System + 'static>(&self) -> SystemId {
        self.system_id::<S>().unwrap_or_else(|| {
            panic!(
                "System `{}` not registered",
                std::any::type_name::<S>()
            )
        })
    }

    // ── Schedules ────────────────────────────────────────────────────

    /// Register a new schedule label, assigning the next [`ScheduleId`].
    ///
    /// # Panics
    ///
    /// Panics if `Sched` is already registered.
    pub fn add_system_schedule<Sched: ScheduleLabel>(&mut self) -> ScheduleId {
        let id = self.schedules.add::<Sched>();
        debug!(
            "registered schedule `{}` as {:?}",
            self.schedules.name(id),
            id
        );
        id
    }

    /// Run every system in the [`Update`](super::schedule::Update) schedule.
    pub fn run_systems(&mut self) {
        self.run_schedule_id(ScheduleId::UPDATE);
    }

    /// Run every system in schedule `Sched`, in registration order.
    ///
    /// # Panics
    ///
    /// Panics if `Sched` is not registered.
    pub fn run_schedule<Sched: ScheduleLabel>(&mut self) {
        let id = self.schedules.id::<Sched>();
        self.run_schedule_id(id);
    }

    fn run_schedule_id(&mut self, schedule: ScheduleId) {
        #[cfg(feature = "diagnostics")]
        let mut timings = Vec::new();

        // Re-read the slot count each step: systems registered mid-run are
        // appended and still visited in this pass.
        let mut index = 0;
        while index < self.systems.slot_count() {
            let id = SystemId(index as u32);
            index += 1;

            let Some(slot) = self.systems.get_mut(id) else {
                continue;
            };
            if slot.schedule != schedule {
                continue;
            }
            // Already running further up the stack.
            let Some(mut behavior) = slot.behavior.take() else {
                continue;
            };
            let entities: Vec<Entity> = slot.entities.iter().copied().collect();
            trace!("running `{}` on {} entities", slot.name, entities.len());

            #[cfg(feature = "diagnostics")]
            let name = slot.name.clone();
            #[cfg(feature = "diagnostics")]
            let start = std::time::Instant::now();

            behavior.run(self, &entities);

            #[cfg(feature = "diagnostics")]
            timings.push(super::system::SystemTiming {
                name,
                duration_us: start.elapsed().as_secs_f64() * 1_000_000.0,
            });

            // A system that removed itself stays removed.
            if let Some(slot) = self.systems.get_mut(id) {
                slot.behavior = Some(behavior);
            }
        }

        #[cfg(feature = "diagnostics")]
        {
            self.systems.timings = timings;
        }
    }

    /// Per-system timings from the most recent schedule run.
    #[cfg(feature = "diagnostics")]
    pub fn last_run_timings(&self) -> &[super::system::SystemTiming] {
        &self.systems.timings
    }

    // ── Plugins ──────────────────────────────────────────────────────

    /// Install a default-constructed plugin `P`.
    ///
    /// # Panics
    ///
    /// Panics if `P` is already installed.
    pub fn add_plugin<P: Plugin + Default + 'static>(&mut self) {
        self.add_plugin_with(P::default());
    }

    /// Record `plugin` as installed and run its [`build`](Plugin::build)
    /// right away. The plugin value is dropped afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `P` is already installed.
    pub fn add_plugin_with<P: Plugin + 'static>(&mut self, plugin: P) {
        self.plugins.record::<P>();
        debug!("building plugin `{}`", std::any::type_name::<P>());
        plugin.build(self);
    }

    /// Forget that `P` was installed, so it may be added again.
    ///
    /// This does **not** undo anything `P::build` registered: its systems,
    /// resources, and schedules stay in place. Remove those explicitly if
    /// needed.
    ///
    /// # Panics
    ///
    /// Panics if `P` is not installed.
    pub fn remove_plugin<P: Plugin + 'static>(&mut self) {
        self.plugins.forget::<P>();
        debug!("removed plugin `{}`", std::any::type_name::<P>());
    }

    pub fn has_plugin<P: Plugin + 'static>(&self) -> bool {
        self.plugins.contains::<P>()
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Add a default-constructed resource `T`.
    ///
    /// # Panics
    ///
    /// Panics if a `T` is already present.
    pub fn add_resource<T: Default + 'static>(&mut self) {
        self.add_resource_with(T::default());
    }

    /// Add `value` as the resource for its type.
    ///
    /// # Panics
    ///
    /// Panics if a resource of that type is already present.
    pub fn add_resource_with<T: 'static>(&mut self, value: T) {
        self.resources.add(value);
        debug!("added resource `{}`", std::any::type_name::<T>());
    }

    /// Get a shared reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been added.
    pub fn get_resource<T: 'static>(&self) -> &T {
        self.resources.get::<T>()
    }

    /// Get a mutable reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been added.
    pub fn resource_mut<T: 'static>(&mut self) -> &mut T {
        self.resources.get_mut::<T>()
    }

    pub fn try_resource<T: 'static>(&self) -> Option<&T> {
        self.resources.try_get::<T>()
    }

    pub fn try_resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.try_get_mut::<T>()
    }

    /// Remove a resource, taking ownership.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been added.
    pub fn remove_resource<T: 'static>(&mut self) -> T {
        let value = self.resources.remove::<T>();
        debug!("removed resource `{}`", std::any::type_name::<T>());
        value
    }

    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains::<T>()
    }

    // ── Introspection ────────────────────────────────────────────────

    pub(crate) fn allocator(&self) -> &EntityAllocator {
        &self.allocator
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
