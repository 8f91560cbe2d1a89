//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the warehouse and inventory repositories and the optional graph
//! cache.

use std::path::Path;
use std::sync::Arc;

use wms_lib::{
    build_graph, GraphCache, InventoryRepository, SqliteRepository, WarehouseGraph,
    WarehouseRepository,
};
use wms_lib::Error as LibError;

use crate::metrics::record_graph_build;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Database file not found.
    DatabaseNotFound(String),

    /// The database exists but could not be opened as a warehouse store.
    RepositoryOpen(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseNotFound(path) => write!(f, "database not found: {}", path),
            Self::RepositoryOpen(e) => write!(f, "failed to open warehouse database: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RepositoryOpen(e) => Some(e),
            Self::DatabaseNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatabaseNotFound { path } => Self::DatabaseNotFound(path.display().to_string()),
            other => Self::RepositoryOpen(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use wms_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let warehouses = state.warehouses().warehouses();
///     // ... use warehouses
/// }
///
/// let state = AppState::load("path/to/wms.db", true).unwrap();
/// let app = Router::new()
///     .route("/api/v1/warehouses", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    warehouses: Arc<dyn WarehouseRepository>,
    inventory: Arc<dyn InventoryRepository>,
    graph_cache: Option<GraphCache>,
}

impl AppState {
    /// Open the SQLite warehouse database at `db_path`.
    ///
    /// The database is only validated here; every repository call opens its
    /// own read-only connection.
    pub fn load(db_path: impl AsRef<Path>, graph_cache: bool) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        if !db_path.exists() {
            return Err(AppStateError::DatabaseNotFound(
                db_path.display().to_string(),
            ));
        }

        tracing::info!(path = %db_path.display(), "opening warehouse database");
        let repository = SqliteRepository::open(db_path)?;
        Ok(Self::from_repository(repository, graph_cache))
    }

    /// Create application state from a single repository serving both
    /// warehouses and inventory.
    pub fn from_repository<R>(repository: R, graph_cache: bool) -> Self
    where
        R: WarehouseRepository + InventoryRepository + 'static,
    {
        let repository = Arc::new(repository);
        Self::from_components(repository.clone(), repository, graph_cache)
    }

    /// Create application state from pre-built components.
    ///
    /// This is useful for testing or when mixing repository implementations.
    pub fn from_components(
        warehouses: Arc<dyn WarehouseRepository>,
        inventory: Arc<dyn InventoryRepository>,
        graph_cache: bool,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                warehouses,
                inventory,
                graph_cache: graph_cache.then(GraphCache::new),
            }),
        }
    }

    /// Access the warehouse repository.
    pub fn warehouses(&self) -> &dyn WarehouseRepository {
        self.inner.warehouses.as_ref()
    }

    /// Access the inventory repository.
    pub fn inventory(&self) -> &dyn InventoryRepository {
        self.inner.inventory.as_ref()
    }

    /// Access the graph cache, if enabled.
    pub fn graph_cache(&self) -> Option<&GraphCache> {
        self.inner.graph_cache.as_ref()
    }

    /// Check if graphs are cached between requests.
    pub fn has_graph_cache(&self) -> bool {
        self.inner.graph_cache.is_some()
    }

    /// Graph for `warehouse_id`, served from the cache when enabled.
    ///
    /// Blocks on repository I/O; call it from the blocking pool.
    pub fn graph(&self, warehouse_id: &str) -> Result<Arc<WarehouseGraph>, LibError> {
        match &self.inner.graph_cache {
            Some(cache) => {
                let (graph, status) = cache.graph_for(self.warehouses(), warehouse_id)?;
                record_graph_build(status.as_str(), warehouse_id);
                Ok(graph)
            }
            None => {
                let graph = build_graph(self.warehouses(), warehouse_id)?;
                record_graph_build("uncached", warehouse_id);
                Ok(Arc::new(graph))
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("has_graph_cache", &self.inner.graph_cache.is_some())
            .field(
                "cached_graphs",
                &self.inner.graph_cache.as_ref().map_or(0, GraphCache::len),
            )
            .finish()
    }
}
