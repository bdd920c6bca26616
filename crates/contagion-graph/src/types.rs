//! Node, edge, query, and result types for the contact graph.

use std::fmt;
use std::time::Duration;

use contagion_core::{EntityId, Timestamp};
use serde::Serialize;

/// One entity at one distinct timestamp at which it communicated.
///
/// Identity is the (entity, timestamp) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TemporalNode {
    entity: EntityId,
    timestamp: Timestamp,
}

impl TemporalNode {
    pub fn new(entity: EntityId, timestamp: Timestamp) -> Self {
        Self { entity, timestamp }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl fmt::Display for TemporalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(C{}, {})", self.entity, self.timestamp)
    }
}

/// Why an edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Same entity, earlier node to its next node. One direction only.
    Continuity,
    /// Two entities communicating at the same timestamp. Stored in both directions.
    Contact,
}

/// Reachability question: infected `source` at `infected_at`, can `target`
/// be infected by `deadline`?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InfectionQuery {
    pub source: EntityId,
    pub target: EntityId,
    pub infected_at: Timestamp,
    pub deadline: Timestamp,
}

impl InfectionQuery {
    pub fn new(source: EntityId, target: EntityId, infected_at: Timestamp, deadline: Timestamp) -> Self {
        Self {
            source,
            target,
            infected_at,
            deadline,
        }
    }
}

/// A transmission sequence, earliest node first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InfectionPath {
    nodes: Vec<TemporalNode>,
}

impl InfectionPath {
    pub(crate) fn new(nodes: Vec<TemporalNode>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TemporalNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<TemporalNode> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Node at which the infection entered the graph.
    pub fn first(&self) -> Option<&TemporalNode> {
        self.nodes.first()
    }

    /// Node at which the target was reached.
    pub fn last(&self) -> Option<&TemporalNode> {
        self.nodes.last()
    }
}

impl fmt::Display for InfectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Statistics about a built contact graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStats {
    pub events: usize,
    pub entities: usize,
    pub nodes: usize,
    pub continuity_edges: usize,
    /// Directed contact edges; each communicating pair contributes two.
    pub contact_edges: usize,
    pub build_duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_identity_is_entity_and_time() {
        assert_eq!(TemporalNode::new(1, 4), TemporalNode::new(1, 4));
        assert_ne!(TemporalNode::new(1, 4), TemporalNode::new(1, 5));
        assert_ne!(TemporalNode::new(1, 4), TemporalNode::new(2, 4));
    }

    #[test]
    fn path_display_joins_nodes() {
        let path = InfectionPath::new(vec![TemporalNode::new(1, 4), TemporalNode::new(2, 4)]);
        assert_eq!(path.to_string(), "(C1, 4) -> (C2, 4)");
        assert_eq!(path.hops(), 1);
    }
}
