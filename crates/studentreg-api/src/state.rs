//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds the runtime configuration and the registration store.
//! The validator in `studentreg-core` is stateless and is not held here.

use std::sync::Arc;

use thiserror::Error;

use crate::store::memory::MemoryRegistrationStore;
use crate::store::RegistrationStore;

/// Default delimiter joining validation messages into one display string.
pub const DEFAULT_ERROR_DELIMITER: &str = "<br>";

/// Default request body limit (64 KiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Invalid configuration value.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Application configuration.
///
/// Custom `Debug` redacts the `database_url` to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Postgres connection string. If `None`, registrations are kept in memory.
    pub database_url: Option<String>,
    /// Delimiter joining validation messages in the `message` field.
    pub error_delimiter: String,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to defaults; set but malformed
    /// values are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
                reason: "expected a port number",
            })?,
            None => defaults.port,
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "MAX_BODY_BYTES",
                        value,
                        reason: "expected a positive byte count",
                    })
                }
            },
            None => defaults.max_body_bytes,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" | "pretty" => LogFormat::Text,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "LOG_FORMAT",
                        value,
                        reason: "expected \"json\" or \"text\"",
                    })
                }
            },
            None => defaults.log_format,
        };

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            // A delimiter may legitimately be whitespace, so read it unfiltered.
            error_delimiter: lookup("ERROR_DELIMITER")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.error_delimiter),
            max_body_bytes,
            log_format,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("error_delimiter", &self.error_delimiter)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            error_delimiter: DEFAULT_ERROR_DELIMITER.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::Text,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: AppConfig,
    /// Persistence collaborator for accepted registrations.
    pub store: Arc<dyn RegistrationStore>,
}

impl AppState {
    /// Default configuration with an in-memory store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), Arc::new(MemoryRegistrationStore::new()))
    }

    /// Explicit configuration and store.
    pub fn with_config(config: AppConfig, store: Arc<dyn RegistrationStore>) -> Self {
        Self { config, store }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("durable_store", &self.store.is_durable())
            .finish()
    }
}
