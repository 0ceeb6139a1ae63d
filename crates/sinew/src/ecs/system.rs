//! # System — Behaviour Run Against Matching Entities
//!
//! A system is a unit of behaviour with three pieces of bookkeeping attached:
//!
//! - a required [`Signature`]: the component types an entity must have,
//! - a [`ScheduleId`]: which schedule runs it,
//! - a matching set: every live entity whose signature is a superset of the
//!   requirement, kept up to date as components come and go.
//!
//! The matching set is *pushed* into, not queried: every signature change
//! re-tests the entity against every system before the triggering call
//! returns, so a system's entity list is always current when it runs.
//!
//! ## Design Philosophy
//!
//! - One instance per system type. Registering the same type twice panics.
//! - Systems run in registration order within a schedule. That is the one
//!   ordering guarantee.
//! - A system gets `&mut World` plus a snapshot of its matching entities. It
//!   may freely mutate components and resources, and later systems in the same
//!   pass see those mutations.
//!
//! Any `FnMut(&mut World, &[Entity])` is a system, so closures work too.
//!
//! ## Slots
//!
//! Systems live in a `Vec` of slots in insertion order. Removing a system
//! vacates its slot without compacting, so [`SystemId`]s stay stable and the
//! scheduler simply skips vacated slots.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use super::entity::Entity;
use super::schedule::ScheduleId;
use super::signature::Signature;
use super::world::World;

/// A behaviour that can be executed on a [`World`].
pub trait System {
    /// `entities` is this system's matching set as of the start of the run.
    fn run(&mut self, world: &mut World, entities: &[Entity]);
}

/// Blanket impl: any `FnMut(&mut World, &[Entity])` is a `System`.
impl<F: FnMut(&mut World, &[Entity])> System for F {
    fn run(&mut self, world: &mut World, entities: &[Entity]) {
        (self)(world, entities);
    }
}

/// Handle minted by [`World::add_system`](super::world::World::add_system).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SystemId(pub(crate) u32);

/// Registry bookkeeping for one system.
pub(crate) struct SystemSlot {
    pub name: String,
    pub type_id: TypeId,
    /// `None` only while the system is running.
    pub behavior: Option<Box<dyn System>>,
    pub signature: Signature,
    pub schedule: ScheduleId,
    pub entities: BTreeSet<Entity>,
}

impl SystemSlot {
    /// Insert or erase `entity` depending on whether `signature` satisfies
    /// this system's requirement.
    pub fn rematch(&mut self, entity: Entity, signature: &Signature) {
        if signature.is_superset_of(&self.signature) {
            self.entities.insert(entity);
        } else {
            self.entities.remove(&entity);
        }
    }
}

/// Per-system timing recorded during a single schedule run.
#[cfg(feature = "diagnostics")]
#[derive(Clone, Debug, serde::Serialize)]
pub struct SystemTiming {
    pub name: String,
    pub duration_us: f64,
}

pub(crate) struct SystemRegistry {
    slots: Vec<Option<SystemSlot>>,
    ids: HashMap<TypeId, SystemId>,
    /// Per-system timings from the most recent schedule run.
    #[cfg(feature = "diagnostics")]
    pub timings: Vec<SystemTiming>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            ids: HashMap::new(),
            #[cfg(feature = "diagnostics")]
            timings: Vec::new(),
        }
    }

    /// Append a new slot for `S`.
    ///
    /// # Panics
    ///
    /// Panics if `S` is already registered.
    pub fn register<S: System + 'static>(
        &mut self,
        system: S,
        signature: Signature,
        schedule: ScheduleId,
    ) -> SystemId {
        let type_id = TypeId::of::<S>();
        assert!(
            !self.ids.contains_key(&type_id),
            "Adding system `{}` more than once",
            std::any::type_name::<S>()
        );

        let id = SystemId(self.slots.len() as u32);
        self.slots.push(Some(SystemSlot {
            name: short_type_name(std::any::type_name::<S>()),
            type_id,
            behavior: Some(Box::new(system)),
            signature,
            schedule,
            entities: BTreeSet::new(),
        }));
        self.ids.insert(type_id, id);
        id
    }

    /// Vacate a slot. The behaviour is dropped; the slot is never reused.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacated.
    pub fn vacate(&mut self, id: SystemId) -> SystemSlot {
        let slot = self
            .slots
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("Removing system {:?} that is not registered", id));
        self.ids.remove(&slot.type_id);
        slot
    }

    pub fn id_of(&self, type_id: &TypeId) -> Option<SystemId> {
        self.ids.get(type_id).copied()
    }

    pub fn get(&self, id: SystemId) -> Option<&SystemSlot> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SystemId) -> Option<&mut SystemSlot> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Live slots in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SystemSlot> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SystemSlot> {
        self.slots.iter_mut().flatten()
    }

    /// Number of slots ever created, including vacated ones.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live systems.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// last meaningful segment (e.g. `demo::PrintColor` → `PrintColor`,
/// `{{closure}}` → `<closure>`).
pub(crate) fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);
    if name.contains("closure") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::signature::ComponentId;

    struct Noop;
    impl System for Noop {
        fn run(&mut self, _world: &mut World, _entities: &[Entity]) {}
    }

    fn noop_system(_world: &mut World, _entities: &[Entity]) {}

    #[test]
    fn registry_captures_names() {
        let mut registry = SystemRegistry::new();
        registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
        registry.register(noop_system, Signature::EMPTY, ScheduleId::UPDATE);
        registry.register(
            |_world: &mut World, _entities: &[Entity]| {},
            Signature::EMPTY,
            ScheduleId::UPDATE,
        );
        let names: Vec<_> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Noop", "noop_system", "<closure>"]);
    }

    #[test]
    #[should_panic(expected = "more than once")]
    fn duplicate_type_panics() {
        let mut registry = SystemRegistry::new();
        registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
        registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
    }

    #[test]
    fn vacate_keeps_ids_stable() {
        let mut registry = SystemRegistry::new();
        let first = registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
        let second = registry.register(noop_system, Signature::EMPTY, ScheduleId::SETUP);

        registry.vacate(first);
        assert!(registry.get(first).is_none());
        assert_eq!(registry.get(second).map(|s| s.schedule), Some(ScheduleId::SETUP));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.slot_count(), 2);

        // The type may be registered again and gets a fresh slot.
        let again = registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
        assert_eq!(again, SystemId(2));
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn vacate_twice_panics() {
        let mut registry = SystemRegistry::new();
        let id = registry.register(Noop, Signature::EMPTY, ScheduleId::UPDATE);
        registry.vacate(id);
        registry.vacate(id);
    }

    #[test]
    fn rematch_is_superset_test() {
        let a = ComponentId(0);
        let b = ComponentId(1);
        let c = ComponentId(2);
        let mut registry = SystemRegistry::new();
        let id = registry.register(
            Noop,
            Signature::new().with(a).with(b),
            ScheduleId::UPDATE,
        );
        let slot = registry.get_mut(id).unwrap();

        slot.rematch(Entity(1), &Signature::new().with(a).with(b).with(c));
        slot.rematch(Entity(2), &Signature::new().with(a));
        assert!(slot.entities.contains(&Entity(1)));
        assert!(!slot.entities.contains(&Entity(2)));

        // Losing a required component erases; erasing twice is fine.
        slot.rematch(Entity(1), &Signature::new().with(a).with(c));
        slot.rematch(Entity(1), &Signature::new().with(a).with(c));
        assert!(slot.entities.is_empty());
    }

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("demo::systems::PrintColor"), "PrintColor");
        assert_eq!(short_type_name("demo::Wrapper<demo::Inner>"), "Wrapper");
        assert_eq!(short_type_name("demo::main::{{closure}}"), "<closure>");
    }
}
