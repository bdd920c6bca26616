//! Infection reachability: BFS over the frozen contact graph.
//!
//! All search state (discovered set, predecessor map, frontier) is owned by
//! the call, so queries never write to the graph and may run concurrently.

use std::collections::VecDeque;

use contagion_core::{EntityId, FxHashMap, FxHashSet, GraphError, GraphResult, Timestamp};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::graph::ContactGraph;
use crate::types::{InfectionPath, InfectionQuery};

impl ContactGraph {
    /// Can `target` be infected by `deadline` if `source` was infected at
    /// `infected_at`?
    ///
    /// Returns the transmission path, earliest node first, or `Ok(None)` when
    /// no path exists (including when either entity never communicated).
    /// Fails only if `infected_at > deadline`. O(n + m).
    pub fn query(
        &self,
        source: EntityId,
        target: EntityId,
        infected_at: Timestamp,
        deadline: Timestamp,
    ) -> GraphResult<Option<InfectionPath>> {
        if infected_at > deadline {
            return Err(GraphError::InvalidQueryWindow {
                x: infected_at,
                y: deadline,
            });
        }

        let Some(start) = self
            .node_sequence(source)
            .and_then(|seq| seq.index_at_or_after(infected_at))
        else {
            tracing::trace!(source, infected_at, "source has no activity at or after infection time");
            return Ok(None);
        };

        // Every node reachable from the start is at or after its timestamp.
        if self.graph[start].timestamp() > deadline {
            tracing::trace!(source, infected_at, deadline, "source first active after deadline");
            return Ok(None);
        }

        let path = self.search(start, target, deadline);
        tracing::debug!(
            source,
            target,
            infected_at,
            deadline,
            hops = path.as_ref().map(|p| p.hops()),
            "infection query"
        );
        Ok(path)
    }

    /// `query` with the arguments bundled.
    pub fn run(&self, query: &InfectionQuery) -> GraphResult<Option<InfectionPath>> {
        self.query(query.source, query.target, query.infected_at, query.deadline)
    }

    /// Answer many queries, in parallel once the batch reaches
    /// `parallel_min_batch`. Results are in input order.
    pub fn query_batch(&self, queries: &[InfectionQuery]) -> Vec<GraphResult<Option<InfectionPath>>> {
        if queries.len() < self.parallel_min_batch() {
            queries.iter().map(|q| self.run(q)).collect()
        } else {
            queries.par_iter().map(|q| self.run(q)).collect()
        }
    }

    /// BFS from `start` until a `target` node with timestamp <= `deadline` is
    /// discovered. Target nodes past the deadline do not stop the search.
    fn search(&self, start: NodeIndex, target: EntityId, deadline: Timestamp) -> Option<InfectionPath> {
        let reaches = |ix: NodeIndex| {
            let node = self.graph[ix];
            node.entity() == target && node.timestamp() <= deadline
        };

        if reaches(start) {
            return Some(InfectionPath::new(vec![self.graph[start]]));
        }

        let mut discovered = FxHashSet::default();
        let mut predecessor: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
        let mut queue = VecDeque::new();

        discovered.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for (neighbor, _) in self.successors(node) {
                if !discovered.insert(neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, node);
                if reaches(neighbor) {
                    return Some(self.reconstruct(start, neighbor, &predecessor));
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Walk predecessor links from `end` back to `start`.
    fn reconstruct(
        &self,
        start: NodeIndex,
        end: NodeIndex,
        predecessor: &FxHashMap<NodeIndex, NodeIndex>,
    ) -> InfectionPath {
        let mut nodes = vec![self.graph[end]];
        let mut current = end;
        while current != start {
            match predecessor.get(&current) {
                Some(&prev) => {
                    nodes.push(self.graph[prev]);
                    current = prev;
                }
                None => break,
            }
        }
        nodes.reverse();
        InfectionPath::new(nodes)
    }
}
