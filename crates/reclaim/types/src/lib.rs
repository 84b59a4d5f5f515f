//! # Reclaim Types
//!
//! Core types for Reclaim - player-funded restoration of destroyed structures
//! in session-based multiplayer servers.
//!
//! ## Core Principles
//!
//! 1. **Ledgers are Scoped**: A fund ledger exists per destroyed structure and
//!    only while that structure stays destroyed
//! 2. **Costs are Live**: Restoration cost is recomputed from the live team
//!    size at every decision point, never cached
//! 3. **Definitions Resolve Lazily**: Configured type names are matched against
//!    the running session on every use, so stale handles cannot leak across
//!    session boundaries
//! 4. **Credits are Clamped**: Contributions never exceed the contributor's
//!    balance or the remaining need; refunds return exactly what was given
//!
//! ## Module Organization
//!
//! - [`config`]: Funding configuration and per-definition settings
//! - [`credits`]: Credit amounts and the funding completion tolerance
//! - [`definition`]: Restore definitions mapping acronyms to structure types
//! - [`errors`]: Error types for the funding layer
//! - [`event`]: Session-scoped funding events and the event journal
//! - [`ids`]: Identifier newtypes for contributors, structures, and teams
//! - [`ledger`]: Per-structure contribution ledgers

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod credits;
pub mod definition;
pub mod errors;
pub mod event;
pub mod ids;
pub mod ledger;

// Re-export commonly used types
pub use config::{DefinitionSettings, FundingConfig, UNLIMITED_RESTORES};
pub use credits::{Credits, FUNDING_EPSILON};
pub use definition::RestoreDefinition;
pub use errors::{FundingError, FundingResult};
pub use event::{
    EventLog, FundingEvent, FundingEventData, FundingEventId, FundingEventKind, SessionId,
};
pub use ids::{Acronym, ContributorId, StructureId, StructureTypeId, StructureTypeName, TeamId};
pub use ledger::FundLedger;

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for Reclaim types
    pub use super::config::{DefinitionSettings, FundingConfig, UNLIMITED_RESTORES};
    pub use super::credits::{Credits, FUNDING_EPSILON};
    pub use super::definition::RestoreDefinition;
    pub use super::errors::{FundingError, FundingResult};
    pub use super::event::{
        EventLog, FundingEvent, FundingEventData, FundingEventId, FundingEventKind, SessionId,
    };
    pub use super::ids::{
        Acronym, ContributorId, StructureId, StructureTypeId, StructureTypeName, TeamId,
    };
    pub use super::ledger::FundLedger;
}
