//! Contact graph configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for event recording, graph construction, and queries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of events to pre-allocate in the log. Default: 0.
    pub event_capacity: Option<usize>,
    /// Log writes dropped after freeze at warn instead of debug. Default: false.
    pub warn_on_ignored_writes: Option<bool>,
    /// Smallest query batch that is fanned out across the rayon pool.
    /// Smaller batches run on the calling thread. Default: 64.
    pub parallel_query_min_batch: Option<usize>,
}

impl GraphConfig {
    /// Returns the effective event pre-allocation, defaulting to 0.
    pub fn effective_event_capacity(&self) -> usize {
        self.event_capacity.unwrap_or(0)
    }

    /// Returns whether ignored writes are logged at warn, defaulting to false.
    pub fn effective_warn_on_ignored_writes(&self) -> bool {
        self.warn_on_ignored_writes.unwrap_or(false)
    }

    /// Returns the parallel batch threshold, defaulting to 64. Never below 1.
    pub fn effective_parallel_query_min_batch(&self) -> usize {
        self.parallel_query_min_batch.unwrap_or(64).max(1)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_query_min_batch == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "graph.parallel_query_min_batch".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
