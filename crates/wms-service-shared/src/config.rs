//! Service configuration sourced from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the warehouse database inside the container.
pub const DEFAULT_DATABASE_PATH: &str = "/data/wms.db";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for a service binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database holding warehouses and stock.
    pub database_path: PathBuf,
    /// HTTP listen port.
    pub port: u16,
    /// Reuse built graphs across requests while the layout is unchanged.
    pub graph_cache_enabled: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            port: DEFAULT_PORT,
            graph_cache_enabled: true,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `WMS_DATABASE_PATH`: SQLite database path (default: `/data/wms.db`)
    /// - `SERVICE_PORT`: HTTP port (default: 8080)
    /// - `GRAPH_CACHE_ENABLED`: "false" disables the graph cache (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_path = lookup("WMS_DATABASE_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let port = lookup("SERVICE_PORT")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.port);

        let graph_cache_enabled = lookup("GRAPH_CACHE_ENABLED")
            .map(|value| !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(defaults.graph_cache_enabled);

        Self {
            database_path,
            port,
            graph_cache_enabled,
        }
    }
}
