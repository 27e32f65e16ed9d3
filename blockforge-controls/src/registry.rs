//! ControlRegistry — read-only lookup over the control catalog.
//!
//! Built once at startup from the built-in catalog (or a custom list for
//! tests); provides name-keyed lookup and default-settings seeding. There
//! is deliberately no mutation API.

use indexmap::IndexMap;
use serde_json::Value;

use crate::catalog::built_in_controls;
use crate::error::{ControlsError, Result};
use crate::types::Control;

/// Name-indexed catalog of control definitions.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    controls: IndexMap<String, Control>,
}

impl ControlRegistry {
    /// Build a registry from an explicit list of controls.
    pub fn new(controls: Vec<Control>) -> Self {
        Self {
            controls: controls.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }

    /// Build the registry with the built-in catalog.
    pub fn built_in() -> Self {
        Self::new(built_in_controls())
    }

    /// Get a control definition by name.
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    /// Get a control definition by name, erroring when it is not registered.
    pub fn require(&self, name: &str) -> Result<&Control> {
        self.controls
            .get(name)
            .ok_or_else(|| ControlsError::UnknownControl {
                name: name.to_string(),
            })
    }

    /// The seed settings for a fresh field of the named control.
    pub fn default_settings(&self, name: &str) -> Result<serde_json::Map<String, Value>> {
        Ok(self.require(name)?.default_settings())
    }

    /// All registered controls, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    /// Number of registered controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn built_in_registry_resolves_known_controls() {
        let registry = ControlRegistry::built_in();
        assert!(registry.get("text").is_some());
        assert!(registry.get("repeater").is_some());
        assert!(registry.get("image").is_none());
    }

    #[test]
    fn require_errors_on_unknown_control() {
        let registry = ControlRegistry::built_in();
        assert_eq!(registry.require("toggle").unwrap().name, "toggle");
        let err = registry.require("carousel").unwrap_err();
        assert!(matches!(err, ControlsError::UnknownControl { ref name } if name == "carousel"));
    }

    #[test]
    fn default_settings_for_unknown_control_errors() {
        let registry = ControlRegistry::built_in();
        let err = registry.default_settings("carousel").unwrap_err();
        assert!(err.to_string().contains("carousel"));
    }

    #[test]
    fn default_settings_seed_from_catalog() {
        let registry = ControlRegistry::built_in();
        let defaults = registry.default_settings("checkbox").unwrap();
        assert_eq!(defaults.get("default"), Some(&json!("0")));
        assert_eq!(defaults.get("location"), Some(&json!("editor")));
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = ControlRegistry::built_in();
        let names: Vec<_> = registry.all().map(|c| c.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"text"));
        assert_eq!(names.last(), Some(&"repeater"));
        assert_eq!(registry.len(), names.len());
    }
}
