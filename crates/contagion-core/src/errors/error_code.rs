//! Stable machine-readable error codes. Existing values never change meaning.

/// Maps an error to a stable SCREAMING_SNAKE code string.
pub trait ContagionErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const GRAPH_REPEATED_BUILD: &str = "GRAPH_REPEATED_BUILD";
pub const GRAPH_NOT_BUILT: &str = "GRAPH_NOT_BUILT";
pub const QUERY_INVALID_WINDOW: &str = "QUERY_INVALID_WINDOW";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const CONFIG_INVALID_VALUE: &str = "CONFIG_INVALID_VALUE";
pub const TRACING_INIT_FAILED: &str = "TRACING_INIT_FAILED";
