//! Definition registry
//!
//! Maps normalized acronyms to restore definitions. Registration is
//! first-wins per acronym; a settings reload clears the table, re-registers
//! every configured entry, and then bulk-applies per-acronym setting
//! overrides.

use reclaim_types::{
    Acronym, DefinitionSettings, FundingError, FundingResult, RestoreDefinition, StructureTypeName,
};
use std::collections::HashMap;

/// Registry of restore definitions, keyed by normalized acronym
#[derive(Clone, Debug, Default)]
pub struct DefinitionRegistry {
    /// All registered definitions
    definitions: HashMap<Acronym, RestoreDefinition>,
}

impl DefinitionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Register a definition under `acronym`.
    ///
    /// The first registration of an acronym wins; later ones are dropped, as
    /// are registrations whose type-name set is empty after filtering.
    /// Returns whether the definition was stored.
    pub fn register(
        &mut self,
        acronym: Acronym,
        type_names: impl IntoIterator<Item = StructureTypeName>,
        settings: DefinitionSettings,
    ) -> bool {
        if self.definitions.contains_key(&acronym) {
            tracing::debug!(acronym = %acronym, "Duplicate acronym registration ignored");
            return false;
        }

        let Some(definition) = RestoreDefinition::new(acronym.clone(), type_names, settings)
        else {
            tracing::debug!(acronym = %acronym, "Definition without usable type names dropped");
            return false;
        };

        tracing::info!(
            acronym = %acronym,
            type_names = definition.type_name_count(),
            "Restore definition registered"
        );
        self.definitions.insert(acronym, definition);
        true
    }

    /// Look up the definition for `acronym`
    pub fn resolve(&self, acronym: &Acronym) -> FundingResult<&RestoreDefinition> {
        self.definitions
            .get(acronym)
            .ok_or_else(|| FundingError::UnknownAcronym(acronym.clone()))
    }

    /// Look up the definition for `acronym` mutably
    pub fn resolve_mut(&mut self, acronym: &Acronym) -> FundingResult<&mut RestoreDefinition> {
        self.definitions
            .get_mut(acronym)
            .ok_or_else(|| FundingError::UnknownAcronym(acronym.clone()))
    }

    /// Overwrite every definition's settings, letting the callback resolve
    /// the effective settings per acronym starting from `defaults`
    pub fn apply_config<F>(&mut self, defaults: DefinitionSettings, mut resolve: F)
    where
        F: FnMut(&Acronym, DefinitionSettings) -> DefinitionSettings,
    {
        for (acronym, definition) in &mut self.definitions {
            definition.set_settings(resolve(acronym, defaults));
        }
    }

    /// Reset every definition's per-session restore counter
    pub fn reset_counters(&mut self) {
        for definition in self.definitions.values_mut() {
            definition.reset();
        }
    }

    /// Drop every definition
    pub fn clear(&mut self) {
        self.definitions.clear();
    }

    /// Whether a definition exists for `acronym`
    pub fn contains(&self, acronym: &Acronym) -> bool {
        self.definitions.contains_key(acronym)
    }

    /// Number of registered definitions
    pub fn count(&self) -> usize {
        self.definitions.len()
    }

    /// Iterate over all registered definitions
    pub fn definitions(&self) -> impl Iterator<Item = &RestoreDefinition> {
        self.definitions.values()
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_definitions: self.definitions.len() as u64,
            total_restorations: self
                .definitions
                .values()
                .map(|d| d.current_restore_count() as u64)
                .sum(),
        }
    }
}

/// Statistics about the definition registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of registered definitions
    pub total_definitions: u64,
    /// Restorations recorded across all definitions this session
    pub total_restorations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reclaim_types::Credits;

    fn names(raw: &[&str]) -> Vec<StructureTypeName> {
        raw.iter().map(|n| StructureTypeName::new(*n)).collect()
    }

    fn populated_registry() -> DefinitionRegistry {
        let mut registry = DefinitionRegistry::new();
        registry.register(
            Acronym::new("pp"),
            names(&["mp_power_plant"]),
            DefinitionSettings::default(),
        );
        registry.register(
            Acronym::new("ref"),
            names(&["mp_refinery", "mp_refinery_destroyed"]),
            DefinitionSettings::default(),
        );
        registry
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = populated_registry();
        assert_eq!(registry.count(), 2);

        let definition = registry.resolve(&Acronym::new("pp")).unwrap();
        assert_eq!(definition.acronym(), &Acronym::new("pp"));
        assert_eq!(definition.type_name_count(), 1);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = populated_registry();
        assert!(registry.resolve(&Acronym::new("PP")).is_ok());
        assert!(registry.resolve(&Acronym::new("Ref")).is_ok());
    }

    #[test]
    fn test_resolve_unknown_acronym() {
        let registry = populated_registry();
        let err = registry.resolve(&Acronym::new("obk")).unwrap_err();
        assert_eq!(err, FundingError::UnknownAcronym(Acronym::new("obk")));
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = populated_registry();
        let stored = registry.register(
            Acronym::new("PP"),
            names(&["mp_other_plant"]),
            DefinitionSettings::default(),
        );
        assert!(!stored);

        let definition = registry.resolve(&Acronym::new("pp")).unwrap();
        let kept: Vec<_> = definition.type_names().map(|n| n.as_str()).collect();
        assert_eq!(kept, vec!["mp_power_plant"]);
    }

    #[test]
    fn test_register_drops_empty_type_sets() {
        let mut registry = DefinitionRegistry::new();
        assert!(!registry.register(Acronym::new("x"), names(&["", "  "]), DefinitionSettings::default()));
        assert!(!registry.contains(&Acronym::new("x")));
    }

    #[test]
    fn test_apply_config_overrides_per_acronym() {
        let mut registry = populated_registry();
        let defaults = DefinitionSettings::default();

        registry.apply_config(defaults, |acronym, base| {
            if acronym == &Acronym::new("pp") {
                DefinitionSettings {
                    restore_cost: Credits::new(5000.0),
                    max_restore_count: 1,
                    ..base
                }
            } else {
                base
            }
        });

        let pp = registry.resolve(&Acronym::new("pp")).unwrap();
        assert_eq!(pp.settings().restore_cost, Credits::new(5000.0));
        assert_eq!(pp.settings().max_restore_count, 1);

        let refinery = registry.resolve(&Acronym::new("ref")).unwrap();
        assert_eq!(refinery.settings(), defaults);
    }

    #[test]
    fn test_reset_counters() {
        let mut registry = populated_registry();
        registry
            .resolve_mut(&Acronym::new("pp"))
            .unwrap()
            .record_restore();
        assert_eq!(registry.stats().total_restorations, 1);

        registry.reset_counters();
        assert_eq!(registry.stats().total_restorations, 0);
        assert_eq!(registry.stats().total_definitions, 2);
    }

    #[test]
    fn test_clear_empties_the_table() {
        let mut registry = populated_registry();
        registry.clear();
        assert_eq!(registry.count(), 0);
        assert!(registry.resolve(&Acronym::new("pp")).is_err());
    }
}
