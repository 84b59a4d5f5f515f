//! Error types for the funding layer

use crate::ids::Acronym;
use thiserror::Error;

/// Errors surfaced by funding operations.
///
/// The [`std::fmt::Display`] text of each variant is the exact message paged
/// back to the contributor whose command failed; the command layer forwards
/// it verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FundingError {
    /// Funding commands are switched off in the session configuration
    #[error("Structure funding is not enabled for this session.")]
    FeatureDisabled,

    /// No definition is registered for the acronym, or none of its configured
    /// types exist in the current session
    #[error("No structure found for acronym '{0}'.")]
    UnknownAcronym(Acronym),

    /// Every structure matching the acronym on the contributor's team is
    /// still intact
    #[error("No destroyed structure found for acronym '{0}'.")]
    NoDestroyedStructure(Acronym),

    /// The definition already reached its per-session restoration cap
    #[error("The maximum amount of restores per session for the {0} is exceeded.")]
    RestoreLimitExceeded(String),

    /// The amount argument was not a positive whole number
    #[error("Invalid fund amount '{0}'.")]
    InvalidAmount(String),

    /// The contributor has no credits to give
    #[error("You do not have enough money to fund the '{0}'.")]
    InsufficientFunds(String),

    /// A refund request found no contribution to return; carries the
    /// structure's display name when the request targeted one structure
    #[error("You haven't funded {}.", .0.as_deref().map_or_else(|| "anything".to_string(), |name| format!("the {name}")))]
    NothingToRefund(Option<String>),

    /// A configuration value is out of range
    #[error("Invalid funding configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for funding operations
pub type FundingResult<T> = Result<T, FundingError>;
