//! World configuration.
//!
//! [`WorldConfig`] fixes the two capacities a world is sized for: how many
//! entities may be alive at once and how many component types may be
//! registered. Both are capacity-planning decisions; exceeding either at
//! runtime panics.
//!
//! The config deserializes from JSON, and missing fields fall back to the
//! defaults:
//!
//! ```
//! let config = sinew::WorldConfig::from_json(r#"{ "max_entities": 128 }"#).unwrap();
//! assert_eq!(config.max_entities, 128);
//! assert_eq!(config.max_components, sinew::MAX_COMPONENTS);
//! ```

use serde::Deserialize;

use crate::ecs::signature::MAX_COMPONENTS;

/// Default entity capacity.
pub const DEFAULT_MAX_ENTITIES: u32 = 5000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Maximum number of simultaneously live entities.
    pub max_entities: u32,
    /// Maximum number of registered component types. Values above
    /// [`MAX_COMPONENTS`] are clamped.
    pub max_components: usize,
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Component limit after clamping to [`MAX_COMPONENTS`].
    pub(crate) fn component_limit(&self) -> usize {
        if self.max_components > MAX_COMPONENTS {
            log::warn!(
                "max_components = {} exceeds the signature width; clamping to {}",
                self.max_components,
                MAX_COMPONENTS
            );
            MAX_COMPONENTS
        } else {
            self.max_components
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
            max_components: MAX_COMPONENTS,
        }
    }
}
