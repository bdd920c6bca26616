//! # contagion-core
//!
//! Foundation crate for the contagion contact-graph engine.
//! Defines identifiers, errors, error codes, config, and tracing setup.
//! The graph crate depends on this for everything ambient.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::ContagionConfig;
pub use errors::error_code::ContagionErrorCode;
pub use errors::{ContagionError, ContagionResult, GraphError, GraphResult};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::identifiers::{EntityId, Timestamp};
