//! Identifier newtypes for the funding layer
//!
//! Contributors, structures, and teams are owned by the host game server; the
//! funding engine only ever holds identifiers and resolves them through the
//! host when it needs live state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a contributor (a player on the host)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ContributorId(String);

impl ContributorId {
    /// Create a new contributor ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContributorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContributorId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Short name a definition is registered and looked up under.
///
/// Acronyms are normalized to lowercase at construction, so every lookup is
/// case-insensitive no matter how the command argument was typed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Acronym(String);

impl Acronym {
    /// Create a normalized acronym
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().to_lowercase())
    }

    /// Get the normalized acronym as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Acronym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Acronym {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Acronym {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identifier of one structure instance, stable for the structure's lifetime
/// within a session
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct StructureId(i32);

impl StructureId {
    /// Create a structure ID from the host's instance number
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw instance number
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for StructureId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Identifier of a team on the host
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct TeamId(i32);

impl TeamId {
    /// Create a team ID
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw team number
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TeamId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Live handle for a structure type within the current session.
///
/// Handles are only valid for the session that produced them; holders must
/// re-resolve from a [`StructureTypeName`] rather than carry one across a
/// session boundary.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct StructureTypeId(u32);

impl StructureTypeId {
    /// Create a type handle from the host's definition number
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw definition number
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StructureTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StructureTypeId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Configured name of a structure type, matched exactly against the host's
/// type catalog when resolved
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct StructureTypeName(String);

impl StructureTypeName {
    /// Create a type name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StructureTypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StructureTypeName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
