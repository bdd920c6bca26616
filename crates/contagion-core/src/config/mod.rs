pub mod graph_config;
pub mod observability_config;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContagionConfig {
    pub graph: GraphConfig,
    pub observability: ObservabilityConfig,
}

impl ContagionConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.graph.validate()?;
        self.observability.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ContagionConfig::from_toml("").unwrap();
        assert_eq!(config.graph.effective_event_capacity(), 0);
        assert!(!config.graph.effective_warn_on_ignored_writes());
        assert_eq!(config.observability.effective_log_level(), "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ContagionConfig::from_toml(
            r#"
[graph]
event_capacity = 4096

[observability]
json = true
"#,
        )
        .unwrap();
        assert_eq!(config.graph.effective_event_capacity(), 4096);
        assert_eq!(config.graph.effective_parallel_query_min_batch(), 64);
        assert!(config.observability.effective_json());
        assert_eq!(config.observability.effective_log_level(), "info");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ContagionConfig::from_toml("[graph\nevent_capacity = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = ContagionConfig::from_toml("[observability]\nlog_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "observability.log_level"));
    }
}
