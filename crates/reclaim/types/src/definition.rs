//! Restore definitions
//!
//! A definition maps one acronym to the set of structure type names it can
//! fund, plus the cost and limit settings governing those restorations. Type
//! names stay as configured text; they resolve to live handles through the
//! host on every use, never ahead of time.

use crate::config::DefinitionSettings;
use crate::ids::{Acronym, StructureTypeId, StructureTypeName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A funding definition registered under one acronym
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestoreDefinition {
    /// Normalized acronym this definition answers to
    acronym: Acronym,
    /// Configured structure type names, deduplicated
    type_names: BTreeSet<StructureTypeName>,
    /// Cost and limit settings
    settings: DefinitionSettings,
    /// Successful restorations recorded this session
    current_restore_count: u32,
}

impl RestoreDefinition {
    /// Build a definition from raw type names.
    ///
    /// Blank names are dropped and duplicates collapse. Returns `None` when
    /// no usable name remains, in which case nothing gets registered.
    pub fn new(
        acronym: Acronym,
        type_names: impl IntoIterator<Item = StructureTypeName>,
        settings: DefinitionSettings,
    ) -> Option<Self> {
        let type_names: BTreeSet<StructureTypeName> = type_names
            .into_iter()
            .filter(|name| !name.as_str().trim().is_empty())
            .collect();
        if type_names.is_empty() {
            return None;
        }
        Some(Self {
            acronym,
            type_names,
            settings,
            current_restore_count: 0,
        })
    }

    /// The acronym this definition is registered under
    pub fn acronym(&self) -> &Acronym {
        &self.acronym
    }

    /// Configured type names, in stable order
    pub fn type_names(&self) -> impl Iterator<Item = &StructureTypeName> {
        self.type_names.iter()
    }

    /// Number of configured type names
    pub fn type_name_count(&self) -> usize {
        self.type_names.len()
    }

    /// Current cost and limit settings
    pub fn settings(&self) -> DefinitionSettings {
        self.settings
    }

    /// Overwrite the cost and limit settings
    pub fn set_settings(&mut self, settings: DefinitionSettings) {
        self.settings = settings;
    }

    /// Successful restorations recorded this session
    pub fn current_restore_count(&self) -> u32 {
        self.current_restore_count
    }

    /// Whether the per-session restoration cap has been reached
    pub fn restore_limit_reached(&self) -> bool {
        self.settings.max_restore_count >= 0
            && self.current_restore_count >= self.settings.max_restore_count as u32
    }

    /// Record a successful restoration, returning the new count
    pub fn record_restore(&mut self) -> u32 {
        self.current_restore_count += 1;
        self.current_restore_count
    }

    /// Reset per-session state
    pub fn reset(&mut self) {
        self.current_restore_count = 0;
    }

    /// Resolve the configured type names against the live session.
    ///
    /// Names the resolver does not know are skipped. An empty result means no
    /// structure type of this definition exists in the current session, and
    /// callers treat the acronym as unknown.
    pub fn validated_types<F>(&self, resolve: F) -> HashSet<StructureTypeId>
    where
        F: FnMut(&StructureTypeName) -> Option<StructureTypeId>,
    {
        self.type_names.iter().filter_map(resolve).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_definition(names: &[&str]) -> Option<RestoreDefinition> {
        RestoreDefinition::new(
            Acronym::new("pp"),
            names.iter().map(|n| StructureTypeName::new(*n)),
            DefinitionSettings::default(),
        )
    }

    #[test]
    fn test_new_filters_blank_names_and_duplicates() {
        let definition = make_definition(&["mp_power", "", "mp_power", "  ", "mp_power_destroyed"])
            .expect("two usable names remain");
        assert_eq!(definition.type_name_count(), 2);
    }

    #[test]
    fn test_new_rejects_empty_name_set() {
        assert!(make_definition(&[]).is_none());
        assert!(make_definition(&["", "   "]).is_none());
    }

    #[test]
    fn test_restore_limit() {
        let mut definition = make_definition(&["mp_power"]).unwrap();
        assert!(!definition.restore_limit_reached());

        definition.set_settings(DefinitionSettings {
            max_restore_count: 2,
            ..DefinitionSettings::default()
        });
        assert!(!definition.restore_limit_reached());
        assert_eq!(definition.record_restore(), 1);
        assert!(!definition.restore_limit_reached());
        assert_eq!(definition.record_restore(), 2);
        assert!(definition.restore_limit_reached());
    }

    #[test]
    fn test_zero_limit_blocks_immediately() {
        let mut definition = make_definition(&["mp_power"]).unwrap();
        definition.set_settings(DefinitionSettings {
            max_restore_count: 0,
            ..DefinitionSettings::default()
        });
        assert!(definition.restore_limit_reached());
    }

    #[test]
    fn test_unlimited_never_blocks() {
        let mut definition = make_definition(&["mp_power"]).unwrap();
        for _ in 0..50 {
            definition.record_restore();
        }
        assert!(!definition.restore_limit_reached());
    }

    #[test]
    fn test_reset_clears_restore_count() {
        let mut definition = make_definition(&["mp_power"]).unwrap();
        definition.record_restore();
        definition.record_restore();
        assert_eq!(definition.current_restore_count(), 2);
        definition.reset();
        assert_eq!(definition.current_restore_count(), 0);
    }

    #[test]
    fn test_validated_types_skips_unknown_names() {
        let definition = make_definition(&["mp_power", "mp_power_destroyed"]).unwrap();
        let types = definition.validated_types(|name| {
            (name.as_str() == "mp_power").then_some(StructureTypeId::new(7))
        });
        assert_eq!(types.len(), 1);
        assert!(types.contains(&StructureTypeId::new(7)));

        let none = definition.validated_types(|_| None);
        assert!(none.is_empty());
    }
}
