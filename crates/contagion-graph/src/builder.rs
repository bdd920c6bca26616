//! GraphBuilder — records events, then sorts once and materializes the
//! time-expanded contact graph.

use std::time::Instant;

use contagion_core::config::GraphConfig;
use contagion_core::{EntityId, FxHashMap, FxHashSet, Timestamp};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::event_log::{CommunicationEvent, EventLog};
use crate::graph::{ContactGraph, Timeline};
use crate::types::{EdgeKind, GraphStats, TemporalNode};

/// Recording phase of the two-phase lifecycle.
///
/// `build` consumes the builder, so no event can be recorded into, and no
/// construction can be repeated on, a frozen graph.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    log: EventLog,
    config: GraphConfig,
}

impl GraphBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that pre-allocates per `config`.
    pub fn with_config(config: &GraphConfig) -> Self {
        Self {
            log: EventLog::with_capacity(config.effective_event_capacity()),
            config: config.clone(),
        }
    }

    /// Record that `a` and `b` communicated at `timestamp`.
    pub fn record(&mut self, a: EntityId, b: EntityId, timestamp: Timestamp) {
        self.log.record(CommunicationEvent::new(a, b, timestamp));
    }

    /// Record every event from `events`.
    pub fn record_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = CommunicationEvent>,
    {
        self.log.extend(events);
    }

    /// Events recorded so far, in arrival order.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Sort the recorded events and freeze them into a `ContactGraph`.
    ///
    /// For each event (a, b, t) in time order, each endpoint either reuses its
    /// latest node (same t) or gets a new node chained from the previous one
    /// by a continuity edge. The two current nodes are then joined by contact
    /// edges in both directions. O(m log m) for m events.
    pub fn build(self) -> ContactGraph {
        let start = Instant::now();
        let event_count = self.log.len();
        let events = self.log.into_sorted();

        let mut state = BuildState::with_capacity(event_count);
        for event in &events {
            state.apply(event);
        }

        let stats = GraphStats {
            events: event_count,
            entities: state.timelines.len(),
            nodes: state.graph.node_count(),
            continuity_edges: state.continuity_edges,
            contact_edges: state.contact_edges,
            build_duration: start.elapsed(),
        };

        tracing::info!(
            events = stats.events,
            entities = stats.entities,
            nodes = stats.nodes,
            continuity_edges = stats.continuity_edges,
            contact_edges = stats.contact_edges,
            duration_us = stats.build_duration.as_micros() as u64,
            "contact graph built"
        );

        ContactGraph::from_parts(state.graph, state.timelines, stats, &self.config)
    }
}

/// Mutable state that only exists while events are being folded in.
struct BuildState {
    graph: DiGraph<TemporalNode, EdgeKind>,
    timelines: FxHashMap<EntityId, Timeline>,
    /// Contact pairs already linked, keyed with the smaller index first.
    linked: FxHashSet<(NodeIndex, NodeIndex)>,
    continuity_edges: usize,
    contact_edges: usize,
}

impl BuildState {
    fn with_capacity(events: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(events, events * 2),
            timelines: FxHashMap::default(),
            linked: FxHashSet::default(),
            continuity_edges: 0,
            contact_edges: 0,
        }
    }

    fn apply(&mut self, event: &CommunicationEvent) {
        let a = self.current_node(event.a, event.timestamp);
        let b = self.current_node(event.b, event.timestamp);

        // Self-communication resolves both endpoints to one node.
        if a == b {
            return;
        }

        let key = if a < b { (a, b) } else { (b, a) };
        if self.linked.insert(key) {
            self.graph.add_edge(a, b, EdgeKind::Contact);
            self.graph.add_edge(b, a, EdgeKind::Contact);
            self.contact_edges += 2;
        }
    }

    /// Node for `entity` at `timestamp`, creating and chaining it if needed.
    ///
    /// Events arrive in time order, so only the last node of the timeline can
    /// share `timestamp`.
    fn current_node(&mut self, entity: EntityId, timestamp: Timestamp) -> NodeIndex {
        let timeline = self.timelines.entry(entity).or_default();
        match timeline.last().copied() {
            Some(last) if self.graph[last].timestamp() == timestamp => last,
            Some(last) => {
                let node = self.graph.add_node(TemporalNode::new(entity, timestamp));
                self.graph.add_edge(last, node, EdgeKind::Continuity);
                self.continuity_edges += 1;
                timeline.push(node);
                node
            }
            None => {
                let node = self.graph.add_node(TemporalNode::new(entity, timestamp));
                timeline.push(node);
                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_builds_empty_graph() {
        let graph = GraphBuilder::new().build();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.index().is_empty());
        assert_eq!(graph.stats().events, 0);
    }

    #[test]
    fn same_timestamp_reuses_the_last_node() {
        let mut builder = GraphBuilder::new();
        builder.record(1, 2, 5);
        builder.record(1, 3, 5);
        let graph = builder.build();

        assert_eq!(graph.node_sequence(1).map(|s| s.len()), Some(1));
        assert_eq!(graph.stats().continuity_edges, 0);
        assert_eq!(graph.stats().contact_edges, 4);
    }

    #[test]
    fn later_timestamp_adds_continuity_edge() {
        let mut builder = GraphBuilder::new();
        builder.record(1, 2, 5);
        builder.record(1, 3, 9);
        let graph = builder.build();

        let seq = graph.node_sequence(1).unwrap();
        assert_eq!(seq.timestamps(), vec![5, 9]);
        let first = seq.first().unwrap();
        let kinds: Vec<_> = first
            .out_edges()
            .filter(|(n, _)| n.entity() == 1)
            .map(|(n, kind)| (n.timestamp(), kind))
            .collect();
        assert_eq!(kinds, vec![(9, EdgeKind::Continuity)]);
        assert_eq!(graph.stats().continuity_edges, 1);
    }

    #[test]
    fn repeated_contact_is_linked_once() {
        let mut builder = GraphBuilder::new();
        builder.record(1, 2, 5);
        builder.record(2, 1, 5);
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.stats().events, 2);
    }

    #[test]
    fn self_contact_creates_node_without_self_loop() {
        let mut builder = GraphBuilder::new();
        builder.record(4, 4, 2);
        builder.record(4, 4, 7);
        let graph = builder.build();

        let seq = graph.node_sequence(4).unwrap();
        assert_eq!(seq.timestamps(), vec![2, 7]);
        assert_eq!(graph.edge_count(), 1);
        for node in seq.iter() {
            assert!(node.out_neighbors().all(|n| n.node() != node.node()));
        }
    }

    #[test]
    fn with_config_keeps_batch_threshold() {
        let config = GraphConfig {
            event_capacity: Some(16),
            parallel_query_min_batch: Some(3),
            ..Default::default()
        };
        let builder = GraphBuilder::with_config(&config);
        let graph = builder.build();
        assert_eq!(graph.parallel_min_batch(), 3);
    }
}
