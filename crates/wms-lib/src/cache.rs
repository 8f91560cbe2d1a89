use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::Result;
use crate::graph::WarehouseGraph;
use crate::hierarchy::Fingerprint;
use crate::repository::WarehouseRepository;

/// Outcome of a [`GraphCache::graph_for`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Cached graph reused.
    Hit,
    /// No graph cached for this warehouse yet.
    Miss,
    /// Layout changed since the cached graph was built.
    Stale,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
            CacheStatus::Stale => "stale",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct CachedGraph {
    fingerprint: Fingerprint,
    graph: Arc<WarehouseGraph>,
}

/// Per-warehouse cache of built graphs.
///
/// The hierarchy is still fetched on every lookup; only the O(n²) edge scan is
/// skipped when its topology fingerprint is unchanged. Bin stock attributes on
/// a cached graph reflect the hierarchy it was built from.
#[derive(Debug, Default)]
pub struct GraphCache {
    entries: RwLock<HashMap<String, CachedGraph>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the graph for `warehouse_id`, rebuilding it when missing or stale.
    pub fn graph_for(
        &self,
        repository: &dyn WarehouseRepository,
        warehouse_id: &str,
    ) -> Result<(Arc<WarehouseGraph>, CacheStatus)> {
        let hierarchy = repository.hierarchy(warehouse_id)?;
        let fingerprint = hierarchy.topology_fingerprint();

        let status = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(warehouse_id) {
                Some(cached) if cached.fingerprint == fingerprint => {
                    return Ok((Arc::clone(&cached.graph), CacheStatus::Hit));
                }
                Some(_) => CacheStatus::Stale,
                None => CacheStatus::Miss,
            }
        };

        let graph = Arc::new(WarehouseGraph::from_hierarchy(&hierarchy));
        debug!(
            warehouse_id = %warehouse_id,
            status = %status,
            fingerprint = %fingerprint,
            "graph cache refreshed"
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            warehouse_id.to_string(),
            CachedGraph {
                fingerprint,
                graph: Arc::clone(&graph),
            },
        );
        Ok((graph, status))
    }

    /// Drop the cached graph for one warehouse. Returns whether one was cached.
    pub fn invalidate(&self, warehouse_id: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(warehouse_id)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
