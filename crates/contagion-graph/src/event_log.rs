//! Append-only buffer of raw communication events.

use contagion_core::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A single communication between two entities at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunicationEvent {
    pub a: EntityId,
    pub b: EntityId,
    pub timestamp: Timestamp,
}

impl CommunicationEvent {
    pub fn new(a: EntityId, b: EntityId, timestamp: Timestamp) -> Self {
        Self { a, b, timestamp }
    }

    /// True when both endpoints are the same entity.
    pub fn is_self_contact(&self) -> bool {
        self.a == self.b
    }
}

impl From<(EntityId, EntityId, Timestamp)> for CommunicationEvent {
    fn from((a, b, timestamp): (EntityId, EntityId, Timestamp)) -> Self {
        Self::new(a, b, timestamp)
    }
}

/// Events in arrival order. No ordering or validation is imposed on append.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CommunicationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Append one event. Amortized O(1).
    pub fn record(&mut self, event: CommunicationEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in the order they were recorded.
    pub fn events(&self) -> &[CommunicationEvent] {
        &self.events
    }

    /// Consume the log, returning events stably sorted by timestamp.
    ///
    /// Events sharing a timestamp keep their arrival order.
    pub(crate) fn into_sorted(mut self) -> Vec<CommunicationEvent> {
        self.events.sort_by_key(|e| e.timestamp);
        self.events
    }
}

impl Extend<CommunicationEvent> for EventLog {
    fn extend<I: IntoIterator<Item = CommunicationEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl FromIterator<CommunicationEvent> for EventLog {
    fn from_iter<I: IntoIterator<Item = CommunicationEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_stable_within_a_timestamp() {
        let raw: [(EntityId, EntityId, Timestamp); 4] = [(5, 6, 3), (1, 2, 1), (7, 8, 3), (3, 4, 1)];
        let log: EventLog = raw
            .into_iter()
            .map(CommunicationEvent::from)
            .collect();
        let sorted = log.into_sorted();
        let pairs: Vec<(i64, i64)> = sorted.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(1, 2), (3, 4), (5, 6), (7, 8)]);
    }

    #[test]
    fn record_keeps_arrival_order() {
        let mut log = EventLog::with_capacity(2);
        log.record(CommunicationEvent::new(1, 2, 9));
        log.record(CommunicationEvent::new(2, 3, 1));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].timestamp, 9);
        assert_eq!(log.events()[1].timestamp, 1);
    }

    #[test]
    fn negative_and_extreme_values_are_accepted() {
        let mut log = EventLog::new();
        log.record(CommunicationEvent::new(i64::MIN, -1, i64::MAX));
        log.record(CommunicationEvent::new(0, 0, i64::MIN));
        let sorted = log.into_sorted();
        assert_eq!(sorted[0].timestamp, i64::MIN);
        assert!(sorted[0].is_self_contact());
    }
}
