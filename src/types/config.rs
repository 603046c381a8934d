//! Configuration structures.
//!
//! Configuration is deserialized from JSON; every section falls back to its
//! defaults when omitted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::{Error, Result};
use crate::logger::is_reserved_key;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Global reporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Reporter configuration.
    #[serde(default)]
    pub reporter: ReporterConfig,
}

impl Config {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::config(format!(
                "unknown log_level {:?}, expected one of {:?}",
                self.observability.log_level, LOG_LEVELS
            )));
        }
        if let Some(key) = self.reporter.fields.keys().find(|k| is_reserved_key(k)) {
            return Err(Error::config(format!(
                "reporter field {:?} is reserved for record data",
                key
            )));
        }
        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Reporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReporterConfig {
    /// Context fields bound onto every record (e.g. `supervisor = "edge-1"`).
    pub fields: BTreeMap<String, String>,
}
