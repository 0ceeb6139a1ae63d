//! # Schedule — Named Groups of Systems
//!
//! A schedule is a label type (any `'static` type implementing
//! [`ScheduleLabel`]) that the world maps to a small [`ScheduleId`] at
//! registration time. Every system is tagged with exactly one schedule, and
//! [`World::run_schedule`](super::world::World::run_schedule) runs the systems
//! tagged with that schedule.
//!
//! Two schedules exist in every world: [`Setup`] (id 0) and [`Update`]
//! (id 1). New systems land in `Update`, which is also what
//! [`World::run_systems`](super::world::World::run_systems) runs.
//!
//! ```ignore
//! struct NewDay;
//! impl ScheduleLabel for NewDay {}
//!
//! world.add_system_schedule::<NewDay>();
//! world.change_system_schedule::<PrintTime, NewDay>();
//! world.run_schedule::<NewDay>();
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use super::system::short_type_name;

/// Marker trait for schedule label types.
pub trait ScheduleLabel: 'static {}

/// Built-in schedule for one-off initialisation systems.
pub struct Setup;
impl ScheduleLabel for Setup {}

/// Built-in default schedule.
pub struct Update;
impl ScheduleLabel for Update {}

/// Small integer handle for a registered schedule, assigned in registration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScheduleId(pub(crate) u16);

impl ScheduleId {
    pub const SETUP: ScheduleId = ScheduleId(0);
    pub const UPDATE: ScheduleId = ScheduleId(1);
}

pub(crate) struct Schedules {
    ids: HashMap<TypeId, ScheduleId>,
    names: Vec<String>,
}

impl Schedules {
    /// Registry pre-populated with [`Setup`] and [`Update`].
    pub fn new() -> Self {
        let mut schedules = Self {
            ids: HashMap::new(),
            names: Vec::new(),
        };
        schedules.add::<Setup>();
        schedules.add::<Update>();
        schedules
    }

    /// # Panics
    ///
    /// Panics if `S` already has an id.
    pub fn add<S: ScheduleLabel>(&mut self) -> ScheduleId {
        let type_id = TypeId::of::<S>();
        assert!(
            !self.ids.contains_key(&type_id),
            "Schedule `{}` registered more than once",
            std::any::type_name::<S>()
        );
        let id = ScheduleId(self.names.len() as u16);
        self.ids.insert(type_id, id);
        self.names.push(short_type_name(std::any::type_name::<S>()));
        id
    }

    pub fn try_id<S: ScheduleLabel>(&self) -> Option<ScheduleId> {
        self.ids.get(&TypeId::of::<S>()).copied()
    }

    /// # Panics
    ///
    /// Panics if `S` was never registered.
    pub fn id<S: ScheduleLabel>(&self) -> ScheduleId {
        self.try_id::<S>().unwrap_or_else(|| {
            panic!(
                "Schedule `{}` not registered. Did you forget `add_system_schedule`?",
                std::any::type_name::<S>()
            )
        })
    }

    pub fn name(&self, id: ScheduleId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NewDay;
    impl ScheduleLabel for NewDay {}

    struct Night;
    impl ScheduleLabel for Night {}

    #[test]
    fn builtins_have_fixed_ids() {
        let schedules = Schedules::new();
        assert_eq!(schedules.id::<Setup>(), ScheduleId::SETUP);
        assert_eq!(schedules.id::<Update>(), ScheduleId::UPDATE);
        assert_eq!(schedules.name(ScheduleId::UPDATE), "Update");
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut schedules = Schedules::new();
        assert_eq!(schedules.add::<NewDay>(), ScheduleId(2));
        assert_eq!(schedules.add::<Night>(), ScheduleId(3));
        assert_eq!(schedules.name(ScheduleId(2)), "NewDay");
        assert_eq!(schedules.len(), 4);
    }

    #[test]
    #[should_panic(expected = "registered more than once")]
    fn duplicate_panics() {
        let mut schedules = Schedules::new();
        schedules.add::<Update>();
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn unknown_panics() {
        let schedules = Schedules::new();
        schedules.id::<NewDay>();
    }
}
