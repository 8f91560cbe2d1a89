//! Structured logging infrastructure for the warehouse routing services.
//!
//! This module provides:
//! - [`LoggingConfig`]: Configuration for the logging system
//! - [`init_logging`]: Initialize tracing with JSON or text formatting
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: Output format, either `json` (default) or `text`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Service name recorded at startup
//!
//! # Example
//!
//! ```no_run
//! use wms_service_shared::logging::{LoggingConfig, init_logging};
//!
//! // Initialize logging at startup (reads LOG_FORMAT from environment)
//! let config = LoggingConfig::from_env().with_service("routing");
//! init_logging(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (default, production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

impl LogFormat {
    /// Parse log format from string.
    ///
    /// Accepts "json", "text", or "pretty" (alias for text).
    /// Returns `Json` for any other value.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format (json or text).
    pub format: LogFormat,
    /// Log level filter (e.g., "info", "debug", "wms_lib=debug").
    pub level: String,
    /// Service name recorded in the startup log entry.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// - `LOG_FORMAT`: "json" (default) or "text"
    /// - `RUST_LOG`: Log level filter (default: "info")
    /// - `SERVICE_NAME`: Service name for log entries (optional)
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let service = std::env::var("SERVICE_NAME").ok();

        Self {
            format,
            level,
            service,
        }
    }

    /// Set the service name unless `SERVICE_NAME` already provided one.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// It should be called once at application startup; later calls leave the
/// first subscriber in place.
///
/// # JSON Format (default)
///
/// ```json
/// {"timestamp":"2026-01-12T10:00:00Z","level":"INFO","target":"wms_service_routing","fields":{"message":"..."}}
/// ```
///
/// # Text Format (development)
///
/// ```text
/// 2026-01-12T10:00:00Z  INFO wms_service_routing: listening on
/// ```
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            service = config.service.as_deref().unwrap_or("wms"),
            format = config.format.as_str(),
            level = %config.level,
            "logging initialised"
        );
    }
}
