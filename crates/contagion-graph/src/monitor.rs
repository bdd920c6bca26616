//! ContactMonitor — one object spanning both lifecycle phases.
//!
//! Wraps `GraphBuilder` → `ContactGraph` for drivers that hold a single
//! handle: writes after `build()` are dropped and counted, a second
//! `build()` is reported, and queries before `build()` are rejected.

use std::sync::Arc;

use contagion_core::config::GraphConfig;
use contagion_core::{EntityId, GraphError, GraphResult, Timestamp};

use crate::builder::GraphBuilder;
use crate::graph::{AdjacencyIndex, ContactGraph, NodeSequence};
use crate::types::{GraphStats, InfectionPath};

/// What happened to an appended event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// The graph was already frozen; the event was dropped.
    Ignored,
}

#[derive(Debug)]
enum Phase {
    Recording(GraphBuilder),
    Frozen(Arc<ContactGraph>),
}

/// Records communications, freezes them once, then answers infection queries.
#[derive(Debug)]
pub struct ContactMonitor {
    phase: Phase,
    ignored_writes: u64,
    warn_on_ignored_writes: bool,
}

impl ContactMonitor {
    pub fn new() -> Self {
        Self::with_config(&GraphConfig::default())
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self {
            phase: Phase::Recording(GraphBuilder::with_config(config)),
            ignored_writes: 0,
            warn_on_ignored_writes: config.effective_warn_on_ignored_writes(),
        }
    }

    /// Record that `a` and `b` communicated at `timestamp`. No-op once built.
    pub fn append_event(&mut self, a: EntityId, b: EntityId, timestamp: Timestamp) -> RecordOutcome {
        match &mut self.phase {
            Phase::Recording(builder) => {
                builder.record(a, b, timestamp);
                RecordOutcome::Recorded
            }
            Phase::Frozen(_) => {
                self.ignored_writes += 1;
                if self.warn_on_ignored_writes {
                    tracing::warn!(a, b, timestamp, "event recorded after build ignored");
                } else {
                    tracing::debug!(a, b, timestamp, "event recorded after build ignored");
                }
                RecordOutcome::Ignored
            }
        }
    }

    /// Build and freeze the graph. Single-use: a second call returns
    /// `GraphError::RepeatedBuild` and leaves the built graph untouched.
    pub fn build(&mut self) -> GraphResult<GraphStats> {
        let builder = match &mut self.phase {
            Phase::Recording(builder) => std::mem::take(builder),
            Phase::Frozen(_) => {
                tracing::warn!("build() called on an already frozen contact graph");
                return Err(GraphError::RepeatedBuild);
            }
        };
        let graph = Arc::new(builder.build());
        let stats = graph.stats().clone();
        self.phase = Phase::Frozen(graph);
        Ok(stats)
    }

    /// See [`ContactGraph::query`]. Fails with `NotBuilt` before `build()`.
    pub fn query(
        &self,
        source: EntityId,
        target: EntityId,
        infected_at: Timestamp,
        deadline: Timestamp,
    ) -> GraphResult<Option<InfectionPath>> {
        self.graph()
            .ok_or(GraphError::NotBuilt)?
            .query(source, target, infected_at, deadline)
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.phase, Phase::Frozen(_))
    }

    /// Events dropped because they arrived after `build()`.
    pub fn ignored_writes(&self) -> u64 {
        self.ignored_writes
    }

    pub fn graph(&self) -> Option<&ContactGraph> {
        match &self.phase {
            Phase::Frozen(graph) => Some(graph),
            Phase::Recording(_) => None,
        }
    }

    /// Shared handle for querying from other threads.
    pub fn shared_graph(&self) -> Option<Arc<ContactGraph>> {
        match &self.phase {
            Phase::Frozen(graph) => Some(Arc::clone(graph)),
            Phase::Recording(_) => None,
        }
    }

    pub fn index(&self) -> Option<AdjacencyIndex<'_>> {
        self.graph().map(ContactGraph::index)
    }

    pub fn node_sequence(&self, entity: EntityId) -> Option<NodeSequence<'_>> {
        self.graph()?.node_sequence(entity)
    }
}

impl Default for ContactMonitor {
    fn default() -> Self {
        Self::new()
    }
}
