//! Prometheus recorder and the routing service's business metrics.
//!
//! Counters are labelled with the warehouse they concern so a misbehaving
//! layout shows up on its own series.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Metrics settings read from `METRICS_ENABLED` and `METRICS_PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            enabled: lookup("METRICS_ENABLED")
                .map_or(defaults.enabled, |value| !value.eq_ignore_ascii_case("false")),
            path: lookup("METRICS_PATH")
                .filter(|path| path.starts_with('/'))
                .unwrap_or(defaults.path),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `GET /metrics` in Prometheus text format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# metrics recorder not installed\n".to_string())
}

/// Routing operation a metric refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    PickingRoute,
    ShortestPath,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::PickingRoute => "picking_route",
            RouteKind::ShortestPath => "shortest_path",
        }
    }
}

/// A route computed for `warehouse`: counts it and records its stops and length.
pub fn record_route(kind: RouteKind, warehouse: &str, stops: usize, distance: f64) {
    metrics::counter!(
        "wms_routes_calculated_total",
        "kind" => kind.as_str(),
        "warehouse" => warehouse.to_string()
    )
    .increment(1);
    metrics::histogram!("wms_route_stops", "kind" => kind.as_str()).record(stops as f64);
    metrics::histogram!("wms_route_distance", "kind" => kind.as_str()).record(distance);
}

/// A routing request that failed; `reason` is [`wms_lib::Error::reason`] or
/// `validation_error`. Validation failures may not name a warehouse.
pub fn record_route_failed(kind: RouteKind, reason: &'static str, warehouse: &str) {
    let warehouse = if warehouse.trim().is_empty() {
        "-".to_string()
    } else {
        warehouse.to_string()
    };
    metrics::counter!(
        "wms_routes_failed_total",
        "kind" => kind.as_str(),
        "reason" => reason,
        "warehouse" => warehouse
    )
    .increment(1);
}

/// How the graph for `warehouse` was obtained: `hit`, `miss`, `stale` or `uncached`.
pub fn record_graph_build(status: &'static str, warehouse: &str) {
    metrics::counter!(
        "wms_graph_builds_total",
        "status" => status,
        "warehouse" => warehouse.to_string()
    )
    .increment(1);
}

/// Result size of an available-bins lookup, split by whether any bin covers the request.
pub fn record_bins_found(count: usize, covered: bool) {
    metrics::histogram!(
        "wms_available_bins_returned",
        "covered" => if covered { "true" } else { "false" }
    )
    .record(count as f64);
}
