//! # Plugin — One-Shot Registration Bundles
//!
//! A plugin groups a batch of registrations (systems, resources, schedules,
//! schedule reassignments) behind one type. [`World::add_plugin`] builds it
//! immediately and records that it was installed; there is no further plugin
//! behaviour after `build` returns.
//!
//! ```ignore
//! #[derive(Default)]
//! struct ClockPlugin;
//!
//! impl Plugin for ClockPlugin {
//!     fn build(&self, world: &mut World) {
//!         world.add_resource::<TimeOfDay>();
//!         world.add_system::<Advance, ()>();
//!     }
//! }
//!
//! world.add_plugin::<ClockPlugin>();
//! ```
//!
//! Removing a plugin only forgets that it was installed. Whatever `build`
//! registered stays registered.
//!
//! [`World::add_plugin`]: super::world::World::add_plugin

use std::any::TypeId;
use std::collections::HashMap;

use super::system::short_type_name;
use super::world::World;

/// A plugin adds systems, resources, and other configuration to a world.
pub trait Plugin {
    fn build(&self, world: &mut World);
}

/// Installed plugin types, by name for logs and stats.
pub(crate) struct Plugins {
    installed: HashMap<TypeId, String>,
}

impl Plugins {
    pub fn new() -> Self {
        Self {
            installed: HashMap::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if `P` is already recorded.
    pub fn record<P: Plugin + 'static>(&mut self) {
        let type_id = TypeId::of::<P>();
        assert!(
            !self.installed.contains_key(&type_id),
            "Adding plugin `{}` more than once",
            std::any::type_name::<P>()
        );
        self.installed
            .insert(type_id, short_type_name(std::any::type_name::<P>()));
    }

    /// # Panics
    ///
    /// Panics if `P` is not recorded.
    pub fn forget<P: Plugin + 'static>(&mut self) {
        if self.installed.remove(&TypeId::of::<P>()).is_none() {
            panic!(
                "Removing plugin `{}` that is not registered",
                std::any::type_name::<P>()
            );
        }
    }

    pub fn contains<P: Plugin + 'static>(&self) -> bool {
        self.installed.contains_key(&TypeId::of::<P>())
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    /// Installed plugin names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.installed.values().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl Plugin for Empty {
        fn build(&self, _world: &mut World) {}
    }

    #[test]
    fn record_and_forget() {
        let mut plugins = Plugins::new();
        plugins.record::<Empty>();
        assert!(plugins.contains::<Empty>());
        plugins.forget::<Empty>();
        assert!(!plugins.contains::<Empty>());
        plugins.record::<Empty>();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins.names(), ["Empty"]);
    }

    #[test]
    #[should_panic(expected = "more than once")]
    fn record_twice_panics() {
        let mut plugins = Plugins::new();
        plugins.record::<Empty>();
        plugins.record::<Empty>();
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn forget_unknown_panics() {
        let mut plugins = Plugins::new();
        plugins.forget::<Empty>();
    }
}
