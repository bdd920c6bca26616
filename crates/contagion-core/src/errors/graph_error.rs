//! Contact graph lifecycle and query errors.

use super::error_code::{self, ContagionErrorCode};
use crate::types::identifiers::Timestamp;

/// Errors raised by graph construction and reachability queries.
///
/// A missing path is not an error: queries report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("contact graph already built; build() is single-use")]
    RepeatedBuild,

    #[error("contact graph not built yet; call build() before querying")]
    NotBuilt,

    #[error("invalid query window: infection time {x} is after deadline {y}")]
    InvalidQueryWindow { x: Timestamp, y: Timestamp },
}

impl ContagionErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RepeatedBuild => error_code::GRAPH_REPEATED_BUILD,
            Self::NotBuilt => error_code::GRAPH_NOT_BUILT,
            Self::InvalidQueryWindow { .. } => error_code::QUERY_INVALID_WINDOW,
        }
    }
}

/// Convenience type alias.
pub type GraphResult<T> = Result<T, GraphError>;
