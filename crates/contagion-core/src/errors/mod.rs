//! Error types for every contagion subsystem.

mod config_error;
mod contagion_error;
pub mod error_code;
mod graph_error;

pub use config_error::ConfigError;
pub use contagion_error::{ContagionError, ContagionResult};
pub use graph_error::{GraphError, GraphResult};
