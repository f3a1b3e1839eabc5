use crate::error::{AgrimapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for AgriMap clients
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub base_url: ConfigValue<String>,
    pub reconnect_delay_secs: ConfigValue<u64>,
    pub request_timeout_secs: ConfigValue<u64>,
    pub alerts: ConfigValue<bool>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            base_url: ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default),
            reconnect_delay_secs: ConfigValue::new(
                DEFAULT_RECONNECT_DELAY_SECS,
                ConfigSource::Default,
            ),
            request_timeout_secs: ConfigValue::new(
                DEFAULT_REQUEST_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
            alerts: ConfigValue::new(true, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| AgrimapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AgrimapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(base_url) = file_config.base_url {
            self.base_url.update(parse_base_url(&base_url)?, ConfigSource::File);
        }

        if let Some(delay) = file_config.reconnect_delay_secs {
            self.reconnect_delay_secs.update(delay, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(parse_request_timeout(timeout)?, ConfigSource::File);
        }

        if let Some(alerts) = file_config.alerts {
            self.alerts.update(alerts, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file if it exists, otherwise keep the current values
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // AGRIMAP_BASE_URL
        if let Ok(url) = env::var("AGRIMAP_BASE_URL") {
            match parse_base_url(&url) {
                Ok(url) => self.base_url.update(url, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AGRIMAP_BASE_URL value '{}': expected an http(s) URL",
                    url
                ),
            }
        }

        // AGRIMAP_RECONNECT_DELAY
        if let Ok(delay_str) = env::var("AGRIMAP_RECONNECT_DELAY") {
            match delay_str.parse::<u64>() {
                Ok(delay) => self.reconnect_delay_secs.update(delay, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AGRIMAP_RECONNECT_DELAY value '{}': expected whole seconds",
                    delay_str
                ),
            }
        }

        // AGRIMAP_REQUEST_TIMEOUT
        if let Ok(timeout_str) = env::var("AGRIMAP_REQUEST_TIMEOUT") {
            match timeout_str.parse::<u64>().ok().map(parse_request_timeout) {
                Some(Ok(timeout)) => {
                    self.request_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid AGRIMAP_REQUEST_TIMEOUT value '{}': expected positive seconds",
                    timeout_str
                ),
            }
        }

        // AGRIMAP_ALERTS
        if let Ok(alerts_str) = env::var("AGRIMAP_ALERTS") {
            match parse_bool(&alerts_str) {
                Ok(alerts) => self.alerts.update(alerts, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AGRIMAP_ALERTS value '{}': expected true or false",
                    alerts_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.base_url.update(base_url, ConfigSource::Cli);
        }

        if let Some(delay) = overrides.reconnect_delay_secs {
            self.reconnect_delay_secs.update(delay, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.request_timeout_secs {
            match parse_request_timeout(timeout) {
                Ok(timeout) => self.request_timeout_secs.update(timeout, ConfigSource::Cli),
                Err(e) => tracing::warn!(error = %e, "Ignoring request timeout override"),
            }
        }

        if let Some(alerts) = overrides.alerts {
            self.alerts.update(alerts, ConfigSource::Cli);
        }
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs.value)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("base_url".to_string(), (self.base_url.value.clone(), self.base_url.source));

        map.insert(
            "reconnect_delay".to_string(),
            (format!("{}s", self.reconnect_delay_secs.value), self.reconnect_delay_secs.source),
        );

        map.insert(
            "request_timeout".to_string(),
            (format!("{}s", self.request_timeout_secs.value), self.request_timeout_secs.source),
        );

        map.insert("alerts".to_string(), (self.alerts.value.to_string(), self.alerts.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    base_url: Option<String>,
    reconnect_delay_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    alerts: Option<bool>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub base_url: Option<String>,
    pub reconnect_delay_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub alerts: Option<bool>,
}

/// Validate a backend base URL and strip any trailing slash
pub fn parse_base_url(s: &str) -> Result<String> {
    let trimmed = s.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(AgrimapError::ConfigInvalid {
            key: "base_url".to_string(),
            reason: format!("Invalid base URL: {}. Must start with http:// or https://", s),
        })
    }
}

/// Validate a request timeout in seconds; zero is rejected
pub fn parse_request_timeout(secs: u64) -> Result<u64> {
    if secs == 0 {
        Err(AgrimapError::ConfigInvalid {
            key: "request_timeout_secs".to_string(),
            reason: "Request timeout must be at least 1 second".to_string(),
        })
    } else {
        Ok(secs)
    }
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AgrimapError::ConfigInvalid {
            key: "alerts".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}
