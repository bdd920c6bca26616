//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default level when `CONTAGION_LOG` is unset. Default: "info".
    pub log_level: Option<String>,
    /// Emit JSON lines instead of the human-readable format. Default: false.
    pub json: Option<bool>,
}

impl ObservabilityConfig {
    /// Returns the effective log level, defaulting to "info".
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Returns whether JSON output is enabled, defaulting to false.
    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }

    /// Reject unknown log levels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.effective_log_level();
        if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("unknown level '{level}', expected one of {}", LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}
