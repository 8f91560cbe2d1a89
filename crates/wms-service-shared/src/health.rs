//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of warehouses visible through the repository (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouses_loaded: Option<usize>,

    /// Whether built graphs are cached between requests (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_cache_enabled: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            warehouses_loaded: None,
            graph_cache_enabled: None,
        }
    }

    /// Create a ready status with repository information.
    pub fn ready(service: &str, version: &str, warehouses: usize, graph_cache: bool) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            warehouses_loaded: Some(warehouses),
            graph_cache_enabled: Some(graph_cache),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            warehouses_loaded: None,
            graph_cache_enabled: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This is a simple check that does
/// not depend on external resources.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"wms-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK if the warehouse repository answers and lists at least one
/// warehouse.
///
/// # Example
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"wms-service-shared","version":"0.1.0","warehouses_loaded":1,"graph_cache_enabled":true}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let graph_cache = state.has_graph_cache();

    let listing = tokio::task::spawn_blocking(move || state.warehouses().warehouses()).await;

    let status = match listing {
        Ok(Ok(warehouses)) if warehouses.is_empty() => {
            HealthStatus::not_ready(service, version, "no warehouses loaded")
        }
        Ok(Ok(warehouses)) => {
            let status = HealthStatus::ready(service, version, warehouses.len(), graph_cache);
            return (StatusCode::OK, Json(status)).into_response();
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check failed");
            HealthStatus::not_ready(service, version, e.reason())
        }
        Err(e) => {
            tracing::error!(error = %e, "readiness task panicked");
            HealthStatus::not_ready(service, version, "internal_error")
        }
    };

    (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_state;
    use axum::body::to_bytes;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert_eq!(status.version, "1.0.0");
        assert!(status.warehouses_loaded.is_none());
        assert!(status.graph_cache_enabled.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("test-service", "1.0.0", 3, true);
        assert_eq!(status.status, "ok");
        assert_eq!(status.warehouses_loaded, Some(3));
        assert_eq!(status.graph_cache_enabled, Some(true));
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no data");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no data"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("routing", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"routing\""));
        assert!(!json.contains("warehouses_loaded")); // skip_serializing_if
    }

    #[tokio::test]
    async fn test_health_ready_with_demo_state() {
        let response = health_ready(State(test_state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let status: HealthStatus = serde_json::from_slice(&body).unwrap();
        assert_eq!(status.warehouses_loaded, Some(1));
    }

    #[tokio::test]
    async fn test_health_ready_without_warehouses() {
        let state = AppState::from_repository(wms_lib::InMemoryRepository::new(), false);
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
