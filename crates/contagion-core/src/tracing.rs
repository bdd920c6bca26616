//! Tracing subscriber setup.
//!
//! `CONTAGION_LOG` takes precedence over the configured level and accepts the
//! full `EnvFilter` directive syntax (e.g. `contagion_graph=trace,info`).

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{ContagionError, ContagionResult};

/// Environment variable consulted for filter directives.
pub const LOG_ENV_VAR: &str = "CONTAGION_LOG";

/// Build the filter from `CONTAGION_LOG`, falling back to the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> ContagionResult<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));
    let result = if config.effective_json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ContagionError::TracingInit(e.to_string()))?;
    ::tracing::debug!(
        level = config.effective_log_level(),
        json = config.effective_json(),
        "tracing initialized"
    );
    Ok(())
}
