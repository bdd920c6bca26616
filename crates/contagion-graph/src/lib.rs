//! # contagion-graph
//!
//! Time-expanded contact graph for infection reachability.
//!
//! Communication events (a, b, t) are recorded into a [`GraphBuilder`],
//! which sorts them once and freezes them into a [`ContactGraph`]: one node
//! per (entity, distinct timestamp), continuity edges along each entity's
//! timeline, and contact edges in both directions between entities that
//! communicated at the same instant. Queries run a BFS over that frozen
//! graph and return the transmission path.
//!
//! ```rust
//! use contagion_graph::{GraphBuilder, TemporalNode};
//!
//! let mut builder = GraphBuilder::new();
//! builder.record(1, 2, 4);
//! builder.record(2, 4, 8);
//! builder.record(4, 3, 8);
//! let graph = builder.build();
//!
//! let path = graph.query(1, 3, 4, 8).unwrap().unwrap();
//! assert_eq!(path.first(), Some(&TemporalNode::new(1, 4)));
//! assert_eq!(path.last(), Some(&TemporalNode::new(3, 8)));
//! ```

pub mod builder;
pub mod event_log;
pub mod graph;
pub mod monitor;
pub mod query;
pub mod types;

pub use builder::GraphBuilder;
pub use event_log::{CommunicationEvent, EventLog};
pub use graph::{AdjacencyIndex, ContactGraph, NodeRef, NodeSequence};
pub use monitor::{ContactMonitor, RecordOutcome};
pub use types::{EdgeKind, GraphStats, InfectionPath, InfectionQuery, TemporalNode};
