//! # Resources — Singleton Data
//!
//! Resources are "global" data not tied to any entity, such as a clock or a
//! score counter. At most one value of each type lives in a world, stored
//! type-erased and keyed by `TypeId`.
//!
//! Unlike components, resources are strict about their lifecycle: adding one
//! that is already present, or reading or removing one that isn't, is a
//! programming error and panics. The `try_*` accessors are the tolerant path.

use std::any::{Any, TypeId};
use std::collections::HashMap;

pub(crate) struct Resources {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if a `T` is already present.
    pub fn add<T: 'static>(&mut self, value: T) {
        let type_id = TypeId::of::<T>();
        assert!(
            !self.values.contains_key(&type_id),
            "Registering resource `{}` more than once",
            std::any::type_name::<T>()
        );
        self.values.insert(type_id, Box::new(value));
    }

    /// # Panics
    ///
    /// Panics if no `T` is present.
    pub fn get<T: 'static>(&self) -> &T {
        self.try_get::<T>().unwrap_or_else(|| missing::<T>("Getting"))
    }

    /// # Panics
    ///
    /// Panics if no `T` is present.
    pub fn get_mut<T: 'static>(&mut self) -> &mut T {
        self.try_get_mut::<T>()
            .unwrap_or_else(|| missing::<T>("Getting"))
    }

    pub fn try_get<T: 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    pub fn try_get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    /// # Panics
    ///
    /// Panics if no `T` is present.
    pub fn remove<T: 'static>(&mut self) -> T {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
            .unwrap_or_else(|| missing::<T>("Removing"))
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

fn missing<T>(action: &str) -> ! {
    panic!(
        "{} resource `{}` that is not registered. Did you forget to add it?",
        action,
        std::any::type_name::<T>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct TimeOfDay {
        time: i32,
    }

    #[test]
    fn add_get_mutate() {
        let mut resources = Resources::new();
        resources.add(TimeOfDay::default());
        resources.add(String::from("hello"));

        assert_eq!(resources.get::<TimeOfDay>().time, 0);
        resources.get_mut::<TimeOfDay>().time = 4;
        assert_eq!(resources.get::<TimeOfDay>().time, 4);
        assert_eq!(resources.get::<String>(), "hello");
        assert_eq!(resources.len(), 2);
    }

    #[test]
    fn remove_returns_value() {
        let mut resources = Resources::new();
        resources.add(TimeOfDay { time: 9 });
        assert_eq!(resources.remove::<TimeOfDay>(), TimeOfDay { time: 9 });
        assert!(!resources.contains::<TimeOfDay>());
        assert!(resources.try_get::<TimeOfDay>().is_none());
    }

    #[test]
    fn re_add_after_remove() {
        let mut resources = Resources::new();
        resources.add(1u8);
        resources.remove::<u8>();
        resources.add(2u8);
        assert_eq!(*resources.get::<u8>(), 2);
    }

    #[test]
    #[should_panic(expected = "Registering resource")]
    fn duplicate_add_panics() {
        let mut resources = Resources::new();
        resources.add(1u8);
        resources.add(2u8);
    }

    #[test]
    #[should_panic(expected = "Getting resource")]
    fn missing_get_panics() {
        let resources = Resources::new();
        resources.get::<u8>();
    }

    #[test]
    #[should_panic(expected = "Removing resource")]
    fn missing_remove_panics() {
        let mut resources = Resources::new();
        resources.remove::<u8>();
    }
}
