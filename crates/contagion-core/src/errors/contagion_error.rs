use super::error_code::{self, ContagionErrorCode};
use super::{ConfigError, GraphError};

/// Top-level error type for the contagion engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum ContagionError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("tracing init failed: {0}")]
    TracingInit(String),
}

impl ContagionErrorCode for ContagionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::TracingInit(_) => error_code::TRACING_INIT_FAILED,
        }
    }
}

/// Convenience type alias.
pub type ContagionResult<T> = Result<T, ContagionError>;
