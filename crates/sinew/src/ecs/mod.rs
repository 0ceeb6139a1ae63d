//! # Packed-Store ECS
//!
//! An Entity Component System built around one dense array per component
//! type and push-based system matching.
//!
//! ## Module Overview
//!
//! - [`entity`] — Bounded entity id pool
//! - [`signature`] — Component ids and the signature bitset
//! - [`storage`] — Packed per-type component stores
//! - [`system`] — System trait and registry
//! - [`schedule`] — Named schedules
//! - [`plugin`] — One-shot registration bundles
//! - [`resource`] — Singleton resources
//! - [`world`] — Central container tying it all together

pub mod entity;
pub mod plugin;
pub(crate) mod resource;
pub mod schedule;
pub mod signature;
pub mod storage;
pub mod system;
pub mod world;

pub use entity::Entity;
pub use plugin::Plugin;
pub use schedule::{ScheduleId, ScheduleLabel, Setup, Update};
pub use signature::{ComponentId, ComponentSet, MAX_COMPONENTS, Signature};
pub use storage::{ComponentStore, PackedStore};
pub use system::{System, SystemId};
pub use world::World;
