//! # Sinew — Packed-Store Entity Component System
//!
//! An in-process ECS runtime: typed components in dense per-type stores,
//! systems matched to entities by component signature, schedules that run
//! those systems in registration order, one-shot plugins, and singleton
//! resources. Everything lives in an explicit [`World`].
//!
//! Start with `use sinew::prelude::*`.

pub mod config;
pub mod diag;
pub mod ecs;
pub mod prelude;

pub use config::WorldConfig;
pub use ecs::{
    ComponentId, ComponentSet, Entity, MAX_COMPONENTS, PackedStore, Plugin, ScheduleId,
    ScheduleLabel, Setup, Signature, System, SystemId, Update, World,
};
