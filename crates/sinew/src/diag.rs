//! World statistics snapshot.
//!
//! [`World::stats`] collects a [`WorldStats`] describing the entity pool and
//! every registry. The snapshot is `Serialize`, so it can be shipped as JSON
//! to whatever tooling wants it:
//!
//! ```
//! let world = sinew::World::new();
//! let json = serde_json::to_string(&world.stats()).unwrap();
//! assert!(json.contains("\"alive_count\":0"));
//! ```

use serde::Serialize;

use crate::ecs::world::World;

#[derive(Clone, Debug, Serialize)]
pub struct WorldStats {
    pub entity_pool: EntityPoolStats,
    pub components: Vec<ComponentStats>,
    pub systems: Vec<SystemStats>,
    pub schedule_count: usize,
    pub resource_count: usize,
    pub plugins: Vec<String>,
    #[cfg(feature = "diagnostics")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub last_run_timings: Vec<crate::ecs::system::SystemTiming>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntityPoolStats {
    pub capacity: u32,
    pub total_slots: u32,
    pub free_count: usize,
    pub alive_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComponentStats {
    pub id: u8,
    pub name: String,
    pub len: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemStats {
    pub name: String,
    pub schedule: String,
    pub required_components: usize,
    pub matched_entities: usize,
}

impl World {
    /// Collect a statistics snapshot of the whole world.
    pub fn stats(&self) -> WorldStats {
        let allocator = self.allocator();

        let components = self
            .components
            .stores()
            .enumerate()
            .map(|(id, store)| ComponentStats {
                id: id as u8,
                name: crate::ecs::system::short_type_name(store.type_name()),
                len: store.len(),
            })
            .collect();

        let systems = self
            .systems
            .iter()
            .map(|slot| SystemStats {
                name: slot.name.clone(),
                schedule: self.schedules.name(slot.schedule).to_string(),
                required_components: slot.signature.len(),
                matched_entities: slot.entities.len(),
            })
            .collect();

        WorldStats {
            entity_pool: EntityPoolStats {
                capacity: allocator.capacity(),
                total_slots: allocator.total_slots(),
                free_count: allocator.free_count(),
                alive_count: allocator.alive_count(),
            },
            components,
            systems,
            schedule_count: self.schedules.len(),
            resource_count: self.resources.len(),
            plugins: self.plugins.names(),
            #[cfg(feature = "diagnostics")]
            last_run_timings: self.systems.timings.clone(),
        }
    }
}
