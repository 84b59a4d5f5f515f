//! Settings provider and the TOML-backed implementation
//!
//! Hosts keep funding configuration wherever they keep the rest of their
//! server settings; the engine only asks for typed values through
//! [`SettingsProvider`]. [`TomlSettings`] is the file-backed implementation
//! shipped with the crate.
//!
//! Layout, by section:
//!
//! ```toml
//! [restore_funding]
//! enabled = true
//! allow_refund = true
//! restore_cost = 1000.0
//! scale_with_player_count = true
//! scale = 1.0
//! max_restore_count = -1
//! # Per-acronym overrides append the acronym to the key:
//! restore_cost_pp = 2500.0
//!
//! [restore_funding_defs]
//! # key: '|'-joined structure type names, value: '|'-joined acronyms
//! "mp_power_plant" = "pp"
//! "mp_refinery|mp_refinery_destroyed" = "ref|rf"
//! ```

use crate::registry::DefinitionRegistry;
use reclaim_types::{Acronym, Credits, DefinitionSettings, FundingConfig, StructureTypeName};
use std::path::Path;
use thiserror::Error;

/// Section holding the global funding switches and default settings
pub const GENERAL_SECTION: &str = "restore_funding";

/// Section mapping structure type names to acronyms
pub const DEFS_SECTION: &str = "restore_funding_defs";

/// Delimiter between multiple names or acronyms within one defs entry
pub const DEFS_DELIMITER: char = '|';

/// Errors from loading a settings source
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Typed access to host configuration.
///
/// Every getter falls back to the supplied default when the section or key
/// is absent or has the wrong type; a missing settings file behaves exactly
/// like an empty one.
pub trait SettingsProvider {
    /// Read a boolean value
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Read an integer value
    fn get_i32(&self, section: &str, key: &str, default: i32) -> i32;

    /// Read a float value, accepting integer literals
    fn get_f32(&self, section: &str, key: &str, default: f32) -> f32;

    /// Raw key/value entries of a definition-mapping section
    fn definition_entries(&self, section: &str) -> Vec<(String, String)>;
}

/// [`SettingsProvider`] backed by a parsed TOML document
#[derive(Clone, Debug)]
pub struct TomlSettings {
    root: toml::Value,
}

impl TomlSettings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// An empty document; every getter returns its default
    pub fn empty() -> Self {
        Self {
            root: toml::Value::Table(toml::value::Table::new()),
        }
    }

    fn section(&self, name: &str) -> Option<&toml::value::Table> {
        self.root.get(name).and_then(toml::Value::as_table)
    }

    fn value(&self, section: &str, key: &str) -> Option<&toml::Value> {
        self.section(section).and_then(|table| table.get(key))
    }
}

impl std::str::FromStr for TomlSettings {
    type Err = SettingsError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let root = contents.parse::<toml::Value>()?;
        Ok(Self { root })
    }
}

impl SettingsProvider for TomlSettings {
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.value(section, key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    fn get_i32(&self, section: &str, key: &str, default: i32) -> i32 {
        self.value(section, key)
            .and_then(toml::Value::as_integer)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(default)
    }

    fn get_f32(&self, section: &str, key: &str, default: f32) -> f32 {
        match self.value(section, key) {
            Some(toml::Value::Float(f)) => *f as f32,
            Some(toml::Value::Integer(i)) => *i as f32,
            _ => default,
        }
    }

    fn definition_entries(&self, section: &str) -> Vec<(String, String)> {
        self.section(section)
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(key, value)| {
                        value.as_str().map(|v| (key.clone(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Build a [`FundingConfig`] from the general section, falling back to the
/// built-in defaults key by key
pub fn load_funding_config(provider: &dyn SettingsProvider) -> FundingConfig {
    let base = FundingConfig::default();
    FundingConfig {
        enabled: provider.get_bool(GENERAL_SECTION, "enabled", base.enabled),
        allow_refund: provider.get_bool(GENERAL_SECTION, "allow_refund", base.allow_refund),
        defaults: DefinitionSettings {
            restore_cost: Credits::new(provider.get_f32(
                GENERAL_SECTION,
                "restore_cost",
                base.defaults.restore_cost.value(),
            )),
            scale_with_player_count: provider.get_bool(
                GENERAL_SECTION,
                "scale_with_player_count",
                base.defaults.scale_with_player_count,
            ),
            scale: provider.get_f32(GENERAL_SECTION, "scale", base.defaults.scale),
            max_restore_count: provider.get_i32(
                GENERAL_SECTION,
                "max_restore_count",
                base.defaults.max_restore_count,
            ),
        },
    }
}

/// Clear `registry` and rebuild it from the provider's defs entries.
///
/// Each entry key is a `|`-joined list of structure type names; the entry
/// value is a `|`-joined list of acronyms that all share that name set.
/// Every acronym registers individually, first registration wins.
pub fn register_definitions(
    registry: &mut DefinitionRegistry,
    provider: &dyn SettingsProvider,
    defaults: DefinitionSettings,
) {
    registry.clear();
    for (entry_key, entry_value) in provider.definition_entries(DEFS_SECTION) {
        let type_names: Vec<StructureTypeName> = entry_key
            .split(DEFS_DELIMITER)
            .map(StructureTypeName::new)
            .collect();
        for raw_acronym in entry_value.split(DEFS_DELIMITER) {
            registry.register(Acronym::new(raw_acronym), type_names.iter().cloned(), defaults);
        }
    }
}

/// Resolve the effective settings for one acronym: the global defaults,
/// overridden key by key wherever a `<key>_<acronym>` entry exists
pub fn definition_settings(
    provider: &dyn SettingsProvider,
    acronym: &Acronym,
    defaults: DefinitionSettings,
) -> DefinitionSettings {
    DefinitionSettings {
        restore_cost: Credits::new(provider.get_f32(
            GENERAL_SECTION,
            &format!("restore_cost_{acronym}"),
            defaults.restore_cost.value(),
        )),
        scale_with_player_count: provider.get_bool(
            GENERAL_SECTION,
            &format!("scale_with_player_count_{acronym}"),
            defaults.scale_with_player_count,
        ),
        scale: provider.get_f32(GENERAL_SECTION, &format!("scale_{acronym}"), defaults.scale),
        max_restore_count: provider.get_i32(
            GENERAL_SECTION,
            &format!("max_restore_count_{acronym}"),
            defaults.max_restore_count,
        ),
    }
}
