// Configuration management

use crate::auth::api_key::ApiKeyHash;
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const TRUE_VALUES: [&str; 6] = ["true", "1", "yes", "on", "t", "y"];

/// Feature settings for the admin endpoint
///
/// Built once at startup and never mutated; a reload means a new instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureConfig {
    pub enabled: bool,
    pub cache_endpoints: Vec<String>,
    /// First entry is the default namespace used for invalidation
    pub reseller_prefixes: Vec<String>,
}

impl FeatureConfig {
    pub fn new(
        enabled: bool,
        cache_endpoints: Vec<String>,
        reseller_prefixes: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if cache_endpoints.is_empty() {
            return Err(ConfigError::Empty("CACHE_ENDPOINTS"));
        }
        if reseller_prefixes.is_empty() {
            return Err(ConfigError::Empty("RESELLER_PREFIXES"));
        }
        for endpoint in &cache_endpoints {
            Config::validate_url(endpoint, "CACHE_ENDPOINTS")?;
        }
        Ok(Self {
            enabled,
            cache_endpoints,
            reseller_prefixes,
        })
    }

    /// First configured prefix; the list can be emptied after `new()`
    pub fn default_reseller_prefix(&self) -> Result<&str, ConfigError> {
        self.reseller_prefixes
            .first()
            .map(String::as_str)
            .ok_or(ConfigError::Empty("RESELLER_PREFIXES"))
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Admin endpoint
    pub feature: FeatureConfig,
    pub admin_api_key_hashes: Vec<ApiKeyHash>,

    // Cache timeouts
    pub cache_operation_timeout_ms: u64,
    pub cache_connection_timeout_secs: u64,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // file may not exist
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let feature = FeatureConfig::new(
            Self::parse_bool_or_default(&var, "SW_ADMIN_ENABLED", false),
            Self::parse_list_or_default(&var, "CACHE_ENDPOINTS", "redis://127.0.0.1:6379/0"),
            Self::parse_list_or_default(&var, "RESELLER_PREFIXES", "AUTH_"),
        )?;

        let config = Self {
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: Self::parse_port(&var)?,
            feature,
            admin_api_key_hashes: Self::parse_key_hashes(&var)?,
            cache_operation_timeout_ms: Self::parse_or_default(&var, "CACHE_OPERATION_TIMEOUT_MS", 2000)?,
            cache_connection_timeout_secs: Self::parse_or_default(&var, "CACHE_CONNECTION_TIMEOUT_SECS", 5)?,
            request_timeout_secs: Self::parse_or_default(&var, "REQUEST_TIMEOUT_SECS", 30)?,
            body_size_limit_bytes: Self::parse_or_default(&var, "BODY_SIZE_LIMIT_BYTES", 64 * 1024)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: var("LOG_FORMAT").unwrap_or_else(|| "json".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn cache_operation_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_operation_timeout_ms)
    }

    pub fn cache_connection_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_connection_timeout_secs)
    }

    /// Config-style boolean: true/1/yes/on/t/y, case-insensitive
    pub fn is_true_value(value: &str) -> bool {
        TRUE_VALUES.contains(&value.trim().to_lowercase().as_str())
    }

    fn parse_bool_or_default<F>(var: &F, key: &str, default: bool) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        var(key).map(|v| Self::is_true_value(&v)).unwrap_or(default)
    }

    /// Comma-separated, order preserved, blanks dropped
    fn parse_list_or_default<F>(var: &F, key: &str, default: &str) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        var(key)
            .unwrap_or_else(|| default.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_key_hashes<F>(var: &F) -> Result<Vec<ApiKeyHash>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::parse_list_or_default(var, "ADMIN_API_KEY_HASHES", "")
            .iter()
            .map(|hash| {
                ApiKeyHash::from_hash_string(hash).map_err(|reason| ConfigError::InvalidValue {
                    key: "ADMIN_API_KEY_HASHES",
                    value: "<redacted>".to_string(),
                    reason,
                })
            })
            .collect()
    }

    fn parse_port<F>(var: &F) -> Result<u16, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_str = var("PORT").unwrap_or_else(|| "8080".to_string());
        let port = port_str.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
            key: "PORT",
            value: port_str.clone(),
            reason: e.to_string(),
        })?;

        if port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PORT",
                value: port_str,
                reason: "must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    /// Parse a positive number or return default
    fn parse_or_default<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        T: std::str::FromStr + PartialEq + Default,
        T::Err: std::fmt::Display,
    {
        match var(key) {
            Some(value) => {
                let parsed = value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                    key,
                    value: value.clone(),
                    reason: e.to_string(),
                })?;

                if parsed == T::default() {
                    return Err(ConfigError::InvalidValue {
                        key,
                        value,
                        reason: "must be greater than 0".to_string(),
                    });
                }

                Ok(parsed)
            }
            None => Ok(default),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;
        Ok(())
    }

    /// Validate URL format
    fn validate_url(url: &str, key: &'static str) -> Result<(), ConfigError> {
        url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
            key,
            value: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn validate_log_level(level: &str) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "LOG_LEVEL",
                value: level.to_string(),
                reason: format!("must be one of {}", valid_levels.join(", ")),
            });
        }
        Ok(())
    }

    fn validate_log_format(format: &str) -> Result<(), ConfigError> {
        if format != "json" && format != "text" {
            return Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT",
                value: format.to_string(),
                reason: "must be 'json' or 'text'".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Configuration for tests: feature enabled, in-memory cache, `AUTH_` prefix
    pub fn test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            feature: FeatureConfig {
                enabled: true,
                cache_endpoints: vec!["memory://local".to_string()],
                reseller_prefixes: vec!["AUTH_".to_string()],
            },
            admin_api_key_hashes: vec![ApiKeyHash::from_api_key("admin-secret")],
            cache_operation_timeout_ms: 200,
            cache_connection_timeout_secs: 1,
            request_timeout_secs: 5,
            body_size_limit_bytes: 64 * 1024,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
