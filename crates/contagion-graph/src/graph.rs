//! The frozen contact graph and its read-only views.
//!
//! Nodes live in a petgraph arena and are addressed by `NodeIndex`; the
//! per-entity timelines index into that arena. Nothing here hands out
//! `&mut` access, so a `ContactGraph` can be shared freely across threads.

use std::fmt;

use contagion_core::config::GraphConfig;
use contagion_core::{EntityId, FxHashMap, Timestamp};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;

use crate::types::{EdgeKind, GraphStats, TemporalNode};

/// Node indices of one entity, strictly increasing by timestamp.
pub(crate) type Timeline = SmallVec<[NodeIndex; 4]>;

/// Immutable time-expanded contact graph.
#[derive(Debug, Clone)]
pub struct ContactGraph {
    pub(crate) graph: DiGraph<TemporalNode, EdgeKind>,
    timelines: FxHashMap<EntityId, Timeline>,
    stats: GraphStats,
    parallel_min_batch: usize,
}

impl ContactGraph {
    pub(crate) fn from_parts(
        graph: DiGraph<TemporalNode, EdgeKind>,
        timelines: FxHashMap<EntityId, Timeline>,
        stats: GraphStats,
        config: &GraphConfig,
    ) -> Self {
        Self {
            graph,
            timelines,
            stats,
            parallel_min_batch: config.effective_parallel_query_min_batch(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of distinct entities that communicated at least once.
    pub fn entity_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Smallest batch `query_batch` fans out across threads.
    pub fn parallel_min_batch(&self) -> usize {
        self.parallel_min_batch
    }

    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.timelines.contains_key(&entity)
    }

    /// Read-only view of the entity → node sequence mapping.
    pub fn index(&self) -> AdjacencyIndex<'_> {
        AdjacencyIndex { graph: self }
    }

    /// Time-ordered nodes of `entity`, or `None` if it never communicated.
    pub fn node_sequence(&self, entity: EntityId) -> Option<NodeSequence<'_>> {
        self.timelines.get(&entity).map(|timeline| NodeSequence {
            graph: self,
            indices: timeline.as_slice(),
        })
    }

    /// The node for `entity` at exactly `timestamp`, if one exists.
    pub fn find_node(&self, entity: EntityId, timestamp: Timestamp) -> Option<NodeRef<'_>> {
        let seq = self.node_sequence(entity)?;
        let pos = seq.indices.partition_point(|&ix| self.graph[ix].timestamp() < timestamp);
        seq.get(pos).filter(|node| node.timestamp() == timestamp)
    }

    pub(crate) fn node_ref(&self, index: NodeIndex) -> NodeRef<'_> {
        NodeRef { graph: self, index }
    }

    /// Outgoing edges of `index` in the order they were added.
    ///
    /// petgraph links new edges at the head of a node's list, so its own
    /// iteration runs newest first.
    pub(crate) fn successors(&self, index: NodeIndex) -> Successors {
        let mut out: Successors = self
            .graph
            .edges(index)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();
        out.reverse();
        out
    }
}

/// Outgoing (target, kind) pairs of one node, oldest edge first.
pub(crate) type Successors = SmallVec<[(NodeIndex, EdgeKind); 8]>;

/// Borrowed view of one node. Exposes identity and outgoing neighbors only.
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g ContactGraph,
    index: NodeIndex,
}

impl<'g> NodeRef<'g> {
    pub fn node(&self) -> TemporalNode {
        self.graph.graph[self.index]
    }

    pub fn entity(&self) -> EntityId {
        self.node().entity()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.node().timestamp()
    }

    /// Nodes reachable in one hop, in the order their edges were added.
    pub fn out_neighbors(&self) -> impl Iterator<Item = NodeRef<'g>> + 'g {
        self.out_edges().map(|(node, _)| node)
    }

    /// Outgoing neighbors together with the kind of edge leading to each.
    pub fn out_edges(&self) -> impl Iterator<Item = (NodeRef<'g>, EdgeKind)> + 'g {
        let graph = self.graph;
        graph
            .successors(self.index)
            .into_iter()
            .map(move |(index, kind)| (NodeRef { graph, index }, kind))
    }

    pub fn out_degree(&self) -> usize {
        self.graph.graph.neighbors(self.index).count()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("entity", &self.entity())
            .field("timestamp", &self.timestamp())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node(), f)
    }
}

/// One entity's nodes, strictly increasing by timestamp.
#[derive(Clone, Copy)]
pub struct NodeSequence<'g> {
    graph: &'g ContactGraph,
    indices: &'g [NodeIndex],
}

impl<'g> NodeSequence<'g> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<NodeRef<'g>> {
        self.indices
            .get(position)
            .map(|&index| self.graph.node_ref(index))
    }

    pub fn first(&self) -> Option<NodeRef<'g>> {
        self.get(0)
    }

    pub fn last(&self) -> Option<NodeRef<'g>> {
        self.indices.last().map(|&index| self.graph.node_ref(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'g>> + 'g {
        let (graph, indices) = (self.graph, self.indices);
        indices.iter().map(move |&index| graph.node_ref(index))
    }

    pub fn nodes(&self) -> Vec<TemporalNode> {
        self.iter().map(|n| n.node()).collect()
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.iter().map(|n| n.timestamp()).collect()
    }

    /// Earliest node with timestamp >= `time`. O(log n).
    pub fn first_at_or_after(&self, time: Timestamp) -> Option<NodeRef<'g>> {
        let pos = self
            .indices
            .partition_point(|&ix| self.graph.graph[ix].timestamp() < time);
        self.get(pos)
    }

    pub(crate) fn index_at_or_after(&self, time: Timestamp) -> Option<NodeIndex> {
        self.first_at_or_after(time).map(|n| n.index)
    }
}

impl fmt::Debug for NodeSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|n| n.node())).finish()
    }
}

/// Read-only entity → node sequence mapping. Iteration order is unspecified.
#[derive(Clone, Copy)]
pub struct AdjacencyIndex<'g> {
    graph: &'g ContactGraph,
}

impl<'g> AdjacencyIndex<'g> {
    pub fn len(&self) -> usize {
        self.graph.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.timelines.is_empty()
    }

    pub fn get(&self, entity: EntityId) -> Option<NodeSequence<'g>> {
        self.graph.node_sequence(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + 'g {
        self.graph.timelines.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, NodeSequence<'g>)> + 'g {
        let graph = self.graph;
        graph.timelines.iter().map(move |(&entity, timeline)| {
            (
                entity,
                NodeSequence {
                    graph,
                    indices: timeline.as_slice(),
                },
            )
        })
    }
}

impl fmt::Debug for AdjacencyIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
