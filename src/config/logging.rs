use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use serde_json::json;

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConfigSection for LoggingConfig {
    fn section_name() -> &'static str {
        "logging"
    }

    fn validate(&self) -> Result<(), SolverError> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(SolverError::Configuration(format!(
                "Unknown log level: {}",
                self.level
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Logging".to_string(),
            fields: vec![FieldManifest::new(
                "level",
                "string",
                json!("info"),
                None,
                "One of off, error, warn, info, debug, trace",
            )],
        }
    }
}
