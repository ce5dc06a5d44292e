//! Configuration system for MilpForge.
//!
//! Load wrapper configuration from TOML or YAML files to control capability
//! detection and dispatch logging without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use milpforge_config::WrapperConfig;
//!
//! let config = WrapperConfig::from_toml_str(r#"
//!     [proxy]
//!     capability_detection = true
//!     disabled_capabilities = ["bounds"]
//!
//!     [logging]
//!     trace_dispatch = false
//! "#).unwrap();
//!
//! assert!(config.proxy.capability_detection);
//! assert!(config.is_capability_disabled("bounds"));
//! assert!(!config.logging.trace_dispatch);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use milpforge_config::WrapperConfig;
//!
//! let config = WrapperConfig::load("milpforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main wrapper configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WrapperConfig {
    /// Capability-preserving proxy configuration.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Dispatch logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WrapperConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`WrapperConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Enables or disables capability detection at wrap time.
    pub fn with_capability_detection(mut self, enabled: bool) -> Self {
        self.proxy.capability_detection = enabled;
        self
    }

    /// Hides a capability from every proxy built with this configuration.
    pub fn with_disabled_capability(mut self, name: impl Into<String>) -> Self {
        self.proxy.disabled_capabilities.push(name.into());
        self
    }

    /// Enables or disables per-operator trace events.
    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.logging.trace_dispatch = enabled;
        self
    }

    /// Returns true if the named capability must not be exposed.
    pub fn is_capability_disabled(&self, name: &str) -> bool {
        self.proxy
            .disabled_capabilities
            .iter()
            .any(|disabled| disabled == name)
    }

    /// Checks the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for blank or duplicate capability names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.proxy.disabled_capabilities {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "disabled_capabilities contains a blank name".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "capability `{}` is disabled more than once",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Capability-preserving proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProxyConfig {
    /// Inspect capabilities at wrap time. When false every wrap yields a
    /// plain facade.
    #[serde(default = "default_true")]
    pub capability_detection: bool,

    /// Capability names never exposed through a proxy.
    #[serde(default)]
    pub disabled_capabilities: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            capability_detection: true,
            disabled_capabilities: Vec::new(),
        }
    }
}

/// Dispatch logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Emit a `trace` event for every dispatched operator.
    #[serde(default = "default_true")]
    pub trace_dispatch: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            trace_dispatch: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests;
