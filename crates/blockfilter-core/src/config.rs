//! Configuration for blockfilter.
//!
//! The configuration document carries one optional entry per filter, keyed
//! by the filter's stable identifier, plus logging settings for the binary:
//!
//! ```yaml
//! filterconfigs:
//!   - key: model-filter
//!     name: model filter
//!     state: "true"
//!     include: ""
//!     exclude: "Virtual_Disk,QEMU HARDDISK"
//! logging:
//!   level: info
//!   format: text
//! ```

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Strings that `state` accepts as "enabled", compared case-insensitively.
const TRUTHY_VALUES: [&str; 4] = ["1", "yes", "true", "ok"];

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Per-filter configuration entries, scanned in order
    #[serde(default)]
    pub filterconfigs: Vec<FilterConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::load_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Loads configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::invalid_format(e.to_string()))?;

        debug!(
            filter_configs = config.filterconfigs.len(),
            "Parsed filter configuration"
        );

        Ok(config)
    }

    /// Loads configuration using the `config` crate, layering
    /// `BLOCKFILTER__*` environment variables over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or merged.
    pub fn from_config_builder<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix("BLOCKFILTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::load_failed(path.display().to_string(), e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::invalid_format(e.to_string()).into())
    }

    /// Returns the first entry whose key equals `key` exactly.
    pub fn find_filter_config(&self, key: &str) -> Option<&FilterConfig> {
        self.filterconfigs.iter().find(|fc| fc.key == key)
    }
}

/// Configuration entry for a single filter.
///
/// Missing fields deserialize as empty strings. An empty `state` is falsy,
/// so an entry that exists but omits `state` disables its filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Stable filter identifier, e.g. `model-filter`
    pub key: String,

    /// Display name
    pub name: String,

    /// Enabled flag as a truthy/falsy string
    pub state: String,

    /// Comma separated include list
    pub include: String,

    /// Comma separated exclude list
    pub exclude: String,
}

impl FilterConfig {
    /// Whether `state` holds a truthy value.
    pub fn is_enabled(&self) -> bool {
        check_truthy(&self.state)
    }
}

/// Returns true for `1`, `yes`, `true` and `ok`, ignoring case.
pub fn check_truthy(value: &str) -> bool {
    TRUTHY_VALUES
        .iter()
        .any(|truthy| truthy.eq_ignore_ascii_case(value))
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON format for structured logging
    Json,
}
