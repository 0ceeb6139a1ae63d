//! Convenience re-exports — `use sinew::prelude::*` for the common items.

pub use crate::config::WorldConfig;
pub use crate::diag::WorldStats;
pub use crate::ecs::{
    ComponentId, Entity, Plugin, ScheduleLabel, Setup, Signature, System, Update, World,
};
#[cfg(feature = "diagnostics")]
pub use crate::ecs::system::SystemTiming;
