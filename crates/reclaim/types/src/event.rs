//! Funding events and the session journal
//!
//! Everything the funding system does is observable as a stream of events
//! scoped to the current session: contributions, refunds, restorations,
//! reconciliations after external revivals, and the lifecycle markers
//! themselves. The journal is cleared when a new session starts.

use crate::credits::Credits;
use crate::ids::{ContributorId, StructureId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifier of one session (one map/match lifetime on the host)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a new session ID
    pub const fn new(session: u64) -> Self {
        Self(session)
    }

    /// Get the session number
    pub const fn number(&self) -> u64 {
        self.0
    }

    /// Get the next session
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

impl From<u64> for SessionId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

/// Unique identifier for a funding event
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FundingEventId(String);

impl FundingEventId {
    /// Create a new event ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random event ID
    pub fn generate() -> Self {
        Self(format!("event-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FundingEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of funding event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingEventKind {
    // Lifecycle events
    /// A new session began and all funding state was cleared
    SessionStarted,
    /// Settings were reloaded and definitions re-registered
    SettingsReloaded,

    // Ledger events
    /// A contribution was applied to a ledger
    ContributionAccepted,
    /// A contribution was returned to its contributor
    ContributionRefunded,

    // Restoration events
    /// A fully funded structure was restored
    StructureRestored,
    /// A ledger was dropped because its structure came back without funding
    LedgerReconciled,
}

/// Data associated with a funding event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FundingEventData {
    /// No additional data
    None,

    /// Contribution data
    Contribution {
        /// Amount actually applied after clamping
        amount: Credits,
        /// Ledger total after the contribution
        ledger_total: Credits,
        /// Target cost at contribution time
        target_cost: Credits,
    },

    /// Refund data
    Refund {
        /// Amount returned to the contributor
        amount: Credits,
    },

    /// Restoration data
    Restoration {
        /// Ledger total consumed by the restoration
        funded: Credits,
        /// The definition's restore count after this restoration
        restore_count: u32,
    },

    /// Reconciliation data for an externally restored structure
    Reconciliation {
        /// Total returned to contributors, zero when refunds are disabled
        refunded: Credits,
        /// Number of contributors on the dropped ledger
        contributors: u64,
    },
}

/// A funding event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FundingEvent {
    /// Unique event ID
    pub id: FundingEventId,
    /// Session when this event occurred
    pub session: SessionId,
    /// Event kind
    pub kind: FundingEventKind,
    /// When the event occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Contributor involved (if any)
    pub contributor: Option<ContributorId>,
    /// Structure involved (if any)
    pub structure: Option<StructureId>,
    /// Event data
    pub data: FundingEventData,
}

impl FundingEvent {
    /// Create a new funding event
    pub fn new(kind: FundingEventKind, session: SessionId, data: FundingEventData) -> Self {
        Self {
            id: FundingEventId::generate(),
            session,
            kind,
            timestamp: chrono::Utc::now(),
            contributor: None,
            structure: None,
            data,
        }
    }

    /// Set the contributor
    pub fn with_contributor(mut self, contributor: ContributorId) -> Self {
        self.contributor = Some(contributor);
        self
    }

    /// Set the structure
    pub fn with_structure(mut self, structure: StructureId) -> Self {
        self.structure = Some(structure);
        self
    }
}

/// Event filter for querying the journal
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Filter by session
    pub session: Option<SessionId>,
    /// Filter by event kinds
    pub kinds: Option<Vec<FundingEventKind>>,
    /// Filter by contributor
    pub contributor: Option<ContributorId>,
    /// Filter by structure
    pub structure: Option<StructureId>,
    /// Limit results
    pub limit: Option<usize>,
}

impl EventFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by session
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Filter by event kind
    pub fn kind(mut self, kind: FundingEventKind) -> Self {
        self.kinds.get_or_insert_with(Vec::new).push(kind);
        self
    }

    /// Filter by contributor
    pub fn contributor(mut self, contributor: ContributorId) -> Self {
        self.contributor = Some(contributor);
        self
    }

    /// Filter by structure
    pub fn structure(mut self, structure: StructureId) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Set limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check if an event matches this filter
    pub fn matches(&self, event: &FundingEvent) -> bool {
        if let Some(session) = self.session {
            if event.session != session {
                return false;
            }
        }

        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }

        if let Some(ref contributor) = self.contributor {
            if event.contributor.as_ref() != Some(contributor) {
                return false;
            }
        }

        if let Some(structure) = self.structure {
            if event.structure != Some(structure) {
                return false;
            }
        }

        true
    }
}

/// Journal of funding events with secondary indexes
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    /// All events indexed by ID
    events: HashMap<FundingEventId, FundingEvent>,
    /// Events indexed by structure
    by_structure: HashMap<StructureId, Vec<FundingEventId>>,
    /// Events indexed by contributor
    by_contributor: HashMap<ContributorId, Vec<FundingEventId>>,
}

impl EventLog {
    /// Create a new event log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the log
    pub fn add(&mut self, event: FundingEvent) {
        let event_id = event.id.clone();

        if let Some(structure) = event.structure {
            self.by_structure
                .entry(structure)
                .or_default()
                .push(event_id.clone());
        }

        if let Some(ref contributor) = event.contributor {
            self.by_contributor
                .entry(contributor.clone())
                .or_default()
                .push(event_id.clone());
        }

        self.events.insert(event_id, event);
    }

    /// Get an event by ID
    pub fn get(&self, event_id: &FundingEventId) -> Option<&FundingEvent> {
        self.events.get(event_id)
    }

    /// Get all events for a structure
    pub fn get_by_structure(&self, structure: StructureId) -> Vec<&FundingEvent> {
        self.by_structure
            .get(&structure)
            .map(|ids| ids.iter().filter_map(|id| self.events.get(id)).collect())
            .unwrap_or_default()
    }

    /// Get all events for a contributor
    pub fn get_by_contributor(&self, contributor: &ContributorId) -> Vec<&FundingEvent> {
        self.by_contributor
            .get(contributor)
            .map(|ids| ids.iter().filter_map(|id| self.events.get(id)).collect())
            .unwrap_or_default()
    }

    /// Query events with a filter, ordered by timestamp
    pub fn query(&self, filter: &EventFilter) -> Vec<&FundingEvent> {
        let mut results: Vec<&FundingEvent> =
            self.events.values().filter(|e| filter.matches(e)).collect();

        results.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        if let Some(limit) = filter.limit {
            results.truncate(limit);
        }

        results
    }

    /// Get total event count
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all events and indexes
    pub fn clear(&mut self) {
        self.events.clear();
        self.by_structure.clear();
        self.by_contributor.clear();
    }
}
