//! Action registry - the catalog of registered output backends.
//!
//! The registry is an explicitly constructed value owned by the driver,
//! not process-global state: build it once at startup, register every
//! backend, then share it read-only. It stores and returns descriptors;
//! it never invokes their hooks itself.

use std::collections::HashMap;

use crate::exporter::action::Action;
use crate::exporter::errors::ExportError;
use crate::exporter::make;

/// Catalog of output backends, keyed by trigger name.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ActionRegistry {
            actions: HashMap::new(),
        }
    }

    /// Create a registry with the built-in backends registered.
    pub fn with_builtins() -> Result<Self, ExportError> {
        let mut registry = ActionRegistry::new();
        make::register(&mut registry)?;
        Ok(registry)
    }

    /// Register an action under its trigger.
    ///
    /// Registration happens once per trigger; a second registration is a
    /// driver bug and fails rather than silently replacing the first.
    pub fn register(&mut self, action: Action) -> Result<(), ExportError> {
        if self.actions.contains_key(&action.trigger) {
            return Err(ExportError::DuplicateTrigger {
                trigger: action.trigger.clone(),
            });
        }
        tracing::debug!(trigger = %action.trigger, "registered action");
        self.actions.insert(action.trigger.clone(), action);
        Ok(())
    }

    /// Look up an action by trigger, failing if it is not registered.
    pub fn lookup(&self, trigger: &str) -> Result<&Action, ExportError> {
        self.actions
            .get(trigger)
            .ok_or_else(|| ExportError::UnknownAction {
                trigger: trigger.to_string(),
            })
    }

    /// Get an action by trigger.
    pub fn get(&self, trigger: &str) -> Option<&Action> {
        self.actions.get(trigger)
    }

    /// Check whether a trigger is registered.
    pub fn contains(&self, trigger: &str) -> bool {
        self.actions.contains_key(trigger)
    }

    /// Iterate over registered triggers (no ordering guarantee).
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Iterate over registered actions (no ordering guarantee).
    pub fn all(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_include_gmake() {
        let registry = ActionRegistry::with_builtins().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("gmake"));

        let action = registry.lookup("gmake").unwrap();
        assert_eq!(action.trigger, "gmake");
        assert!(action.on_project.is_some());
        assert!(action.on_workspace.is_some());
    }

    #[test]
    fn test_duplicate_trigger_is_rejected() {
        let mut registry = ActionRegistry::with_builtins().unwrap();
        let duplicate = registry.lookup("gmake").unwrap().clone();

        let err = registry.register(duplicate).unwrap_err();
        assert!(matches!(err, ExportError::DuplicateTrigger { trigger } if trigger == "gmake"));
        // The original registration is untouched.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_trigger_is_reported() {
        let registry = ActionRegistry::new();
        let err = registry.lookup("vs2010").unwrap_err();
        assert!(matches!(err, ExportError::UnknownAction { trigger } if trigger == "vs2010"));
        assert!(registry.get("vs2010").is_none());
    }

    #[test]
    fn test_lookups_after_registration() {
        let registry = ActionRegistry::with_builtins().unwrap();
        let triggers: Vec<_> = registry.triggers().collect();
        assert!(triggers.contains(&"gmake"));
        assert_eq!(registry.all().count(), registry.len());
    }
}
