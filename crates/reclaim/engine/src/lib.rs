//! Restoration funding engine for session-based multiplayer servers
//!
//! Players pool credits to bring destroyed structures back. The engine keeps
//! one fund ledger per destroyed structure, recomputes the target cost from
//! the live team size at every decision point, and restores the structure
//! through the host the moment contributions cover the cost.
//!
//! # Key Principle
//!
//! **The controller decides, the host acts.**
//!
//! The engine never touches the game world directly. Balance changes,
//! messages, and the restoration itself go through the [`host`] traits, so
//! the same controller drives a production server and an in-memory test
//! world alike.
//!
//! # Architecture
//!
//! The [`RestorationController`] composes specialized components:
//!
//! - [`DefinitionRegistry`]: acronym to restore-definition table
//! - [`FundingEventBus`]: session journal plus live broadcast of events
//! - [`settings`]: provider trait and the TOML-backed implementation
//! - [`commands`]: chat-command handlers layered over the controller
//!
//! # Example
//!
//! ```rust
//! use reclaim_engine::settings::{self, TomlSettings};
//! use reclaim_engine::DefinitionRegistry;
//! use reclaim_types::Acronym;
//!
//! let settings: TomlSettings = r#"
//!     [restore_funding]
//!     restore_cost = 2000.0
//!
//!     [restore_funding_defs]
//!     "mp_power_plant" = "pp"
//! "#
//! .parse()
//! .unwrap();
//!
//! let config = settings::load_funding_config(&settings);
//! let mut registry = DefinitionRegistry::new();
//! settings::register_definitions(&mut registry, &settings, config.defaults);
//!
//! // Lookups are case-insensitive
//! assert!(registry.contains(&Acronym::new("PP")));
//! assert_eq!(config.defaults.restore_cost.value(), 2000.0);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod commands;
pub mod controller;
pub mod events;
pub mod host;
pub mod registry;
pub mod settings;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use commands::parse_amount;
pub use controller::{ContributionOutcome, ControllerStats, FundStatus, RestorationController};
pub use events::{EventBusStats, FundingEventBus};
pub use host::{CreditAccess, GameHost, Messenger, StructureRef, StructureRestorer, WorldQuery};
pub use registry::{DefinitionRegistry, RegistryStats};
pub use settings::{SettingsError, SettingsProvider, TomlSettings};
