//! Event bus for the funding engine
//!
//! Wraps the session journal with a broadcast channel so live observers
//! (loggers, web panels, replay recorders) can follow funding activity
//! without polling controller state. Publishing never blocks: when nobody
//! subscribes, the send result is ignored.

use reclaim_types::event::EventFilter;
use reclaim_types::{
    ContributorId, EventLog, FundingEvent, FundingEventData, FundingEventId, FundingEventKind,
    SessionId, StructureId,
};
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Journal plus broadcast fan-out for funding events
#[derive(Debug)]
pub struct FundingEventBus {
    /// Session-scoped journal
    event_log: EventLog,
    /// Broadcast channel for live observers
    sender: broadcast::Sender<FundingEvent>,
    /// Current session
    current_session: SessionId,
    /// Event counters by kind
    event_counts: HashMap<String, u64>,
}

impl FundingEventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1000);
        Self {
            event_log: EventLog::new(),
            sender,
            current_session: SessionId::new(0),
            event_counts: HashMap::new(),
        }
    }

    /// Journal an event and fan it out to subscribers
    pub fn publish(&mut self, event: FundingEvent) {
        let kind_name = format!("{:?}", event.kind);
        *self.event_counts.entry(kind_name).or_insert(0) += 1;

        self.event_log.add(event.clone());

        // Ignore send errors when nobody is subscribed
        let _ = self.sender.send(event);
    }

    /// Create an event for the current session and publish it
    pub fn emit(&mut self, kind: FundingEventKind, data: FundingEventData) -> FundingEventId {
        let event = FundingEvent::new(kind, self.current_session, data);
        let event_id = event.id.clone();
        self.publish(event);
        event_id
    }

    /// Subscribe to the live event stream
    pub fn subscribe(&self) -> broadcast::Receiver<FundingEvent> {
        self.sender.subscribe()
    }

    /// The session events are currently stamped with
    pub fn current_session(&self) -> SessionId {
        self.current_session
    }

    /// Advance to the next session and clear the journal
    pub fn begin_session(&mut self) {
        self.current_session = self.current_session.next();
        self.event_log.clear();
        self.event_counts.clear();
    }

    /// Get an event by ID
    pub fn get_event(&self, event_id: &FundingEventId) -> Option<&FundingEvent> {
        self.event_log.get(event_id)
    }

    /// All journaled events for a structure
    pub fn structure_events(&self, structure: StructureId) -> Vec<&FundingEvent> {
        self.event_log.get_by_structure(structure)
    }

    /// All journaled events for a contributor
    pub fn contributor_events(&self, contributor: &ContributorId) -> Vec<&FundingEvent> {
        self.event_log.get_by_contributor(contributor)
    }

    /// Query the journal with a filter
    pub fn query(&self, filter: &EventFilter) -> Vec<&FundingEvent> {
        self.event_log.query(filter)
    }

    /// Number of journaled events this session
    pub fn event_count(&self) -> usize {
        self.event_log.len()
    }

    /// Get event bus statistics
    pub fn stats(&self) -> EventBusStats {
        EventBusStats {
            total_events: self.event_log.len() as u64,
            current_session: self.current_session,
            subscriber_count: self.sender.receiver_count(),
            events_by_kind: self.event_counts.clone(),
        }
    }
}

impl Default for FundingEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the event bus
#[derive(Clone, Debug)]
pub struct EventBusStats {
    /// Events journaled this session
    pub total_events: u64,
    /// Session events are stamped with
    pub current_session: SessionId,
    /// Number of live subscribers
    pub subscriber_count: usize,
    /// Event counts by kind
    pub events_by_kind: HashMap<String, u64>,
}
