use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the WMS routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a bin code does not follow the `AISLE-SHELF-LEVEL-POSITION` layout.
    #[error("invalid location code '{code}': {reason}")]
    InvalidLocationCode { code: String, reason: String },

    /// Raised when the repository has no warehouse with the given identifier.
    #[error("warehouse not found: {warehouse_id}")]
    WarehouseNotFound { warehouse_id: String },

    /// Raised when a bin code is not part of the warehouse graph.
    #[error("unknown location: {code}")]
    UnknownLocation { code: String },

    /// Raised when two bins sit in disconnected parts of the graph.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Database could not be located at the resolved path.
    #[error("database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// Raised when a database lacks the warehouse tables.
    #[error("unsupported database schema; expected warehouses/zones/aisles/shelves/bins tables")]
    UnsupportedSchema,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-readable label, used for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidLocationCode { .. } => "invalid_location",
            Error::WarehouseNotFound { .. } => "warehouse_not_found",
            Error::UnknownLocation { .. } => "unknown_location",
            Error::NoPathFound { .. } => "no_path",
            Error::DatabaseNotFound { .. } | Error::UnsupportedSchema => "database_unavailable",
            Error::Sqlite(_) | Error::Io(_) | Error::Json(_) => "internal_error",
        }
    }
}
