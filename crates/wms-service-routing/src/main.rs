//! Warehouse picking-route HTTP microservice.
//!
//! This service orders the bins of a picking list into a short walking route
//! and answers point-to-point path and stock lookups over the warehouse
//! location graph.
//!
//! # Endpoints
//!
//! - `POST /api/v1/routing/picking-route` - Order bins into a picking route
//! - `POST /api/v1/routing/shortest-path` - Shortest path between two bins
//! - `POST /api/v1/routing/available-bins` - Bins holding stock of a product
//! - `GET /api/v1/routing` - Routing service health
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `WMS_DATABASE_PATH` - Path to the warehouse SQLite database (default: /data/wms.db)
//! - `GRAPH_CACHE_ENABLED` - Reuse built graphs between requests (default: true)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use wms_lib::{
    AvailableBin, Error as LibError, RouteStep, find_available_bins, optimal_route, shortest_path,
};
use wms_service_shared::{
    AppState, AvailableBinsRequest, ErrorPayload, HealthStatus, LoggingConfig, MetricsConfig,
    MetricsLayer, PickingRouteRequest, ProblemDetails, RequestId, RouteKind, ServiceConfig,
    ServiceResponse, ShortestPathRequest, Validate, from_lib_error, health_live, health_ready,
    init_logging, init_metrics, metrics_handler, record_bins_found, record_route,
    record_route_context, record_route_failed,
};

/// Service label used in logs and metrics.
const SERVICE: &str = "routing";

/// Ordered picking route returned to the caller.
#[derive(Debug, Serialize)]
struct PickingRouteResponse {
    route: Vec<String>,
    total_distance: f64,
    steps: Vec<RouteStep>,
    bins_count: usize,
}

/// Point-to-point path returned to the caller.
#[derive(Debug, Serialize)]
struct ShortestPathResponse {
    path: Vec<String>,
    distance: f64,
    /// Number of moves between bins.
    steps: usize,
}

#[derive(Debug, Serialize)]
struct AvailableBinsResponse {
    sku: String,
    requested_quantity: i64,
    bins: Vec<AvailableBin>,
}

/// HTTP response - success, RFC 9457 error, or the bare `{"error"}` body.
#[derive(Debug)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
    Message(StatusCode, ErrorPayload),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
            Response::Message(status, payload) => (status, Json(payload)).into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service(SERVICE);
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        database = %config.database_path.display(),
        port = config.port,
        graph_cache = config.graph_cache_enabled,
        "starting routing service"
    );

    let state = AppState::load(&config.database_path, config.graph_cache_enabled).map_err(|e| {
        error!(error = %e, path = %config.database_path.display(), "failed to load application state");
        e
    })?;

    let app = app(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the service router over `state`.
fn app(state: AppState, metrics_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/routing", get(routing_health))
        .route("/api/v1/routing/picking-route", post(picking_route_handler))
        .route("/api/v1/routing/shortest-path", post(shortest_path_handler))
        .route("/api/v1/routing/available-bins", post(available_bins_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(cors)
        .with_state(state)
}

/// Handle GET /api/v1/routing.
async fn routing_health() -> impl IntoResponse {
    Json(HealthStatus::alive(SERVICE, env!("CARGO_PKG_VERSION")))
}

/// Handle POST /api/v1/routing/picking-route requests.
async fn picking_route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<PickingRouteRequest>,
) -> Response<PickingRouteResponse> {
    let warehouse = request.warehouse_uid.clone();
    record_route_context(&warehouse, request.bin_codes.len());
    info!("handling picking-route request");

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed(RouteKind::PickingRoute, "validation_error", &warehouse);
        return Response::Error(*problem);
    }

    let outcome = tokio::task::spawn_blocking(move || {
        let graph = state.graph(&request.warehouse_uid)?;
        optimal_route(&graph, &request.bin_codes)
    })
    .await;

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            error!(error = %e, "picking route failed");
            record_route_failed(RouteKind::PickingRoute, e.reason(), &warehouse);
            return Response::Error(from_lib_error(&e, &warehouse, request_id.as_str()));
        }
        Err(e) => {
            record_route_failed(RouteKind::PickingRoute, "internal_error", &warehouse);
            return join_failure(&e, &request_id);
        }
    };

    record_route(
        RouteKind::PickingRoute,
        &warehouse,
        result.bins_count(),
        result.total_distance,
    );
    info!(
        total_distance = result.total_distance,
        "picking route computed successfully"
    );

    let bins_count = result.bins_count();
    Response::Success(ServiceResponse::new(PickingRouteResponse {
        route: result.route,
        total_distance: result.total_distance,
        steps: result.steps,
        bins_count,
    }))
}

/// Handle POST /api/v1/routing/shortest-path requests.
///
/// Disconnected bins answer 404 with `{"error": "Caminho não encontrado"}`
/// rather than Problem Details.
async fn shortest_path_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<ShortestPathRequest>,
) -> Response<ShortestPathResponse> {
    let warehouse = request.warehouse_uid.clone();
    record_route_context(&warehouse, 2);
    info!(
        start = %request.start_bin,
        end = %request.end_bin,
        "handling shortest-path request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed(RouteKind::ShortestPath, "validation_error", &warehouse);
        return Response::Error(*problem);
    }

    let outcome = tokio::task::spawn_blocking(move || {
        let graph = state.graph(&request.warehouse_uid)?;
        shortest_path(&graph, &request.start_bin, &request.end_bin)
    })
    .await;

    let path = match outcome {
        Ok(Ok(path)) => path,
        Ok(Err(e @ LibError::NoPathFound { .. })) => {
            warn!(error = %e, "bins are not connected");
            record_route_failed(RouteKind::ShortestPath, e.reason(), &warehouse);
            return Response::Message(StatusCode::NOT_FOUND, ErrorPayload::path_not_found());
        }
        Ok(Err(e)) => {
            error!(error = %e, "shortest path failed");
            record_route_failed(RouteKind::ShortestPath, e.reason(), &warehouse);
            return Response::Error(from_lib_error(&e, &warehouse, request_id.as_str()));
        }
        Err(e) => {
            record_route_failed(RouteKind::ShortestPath, "internal_error", &warehouse);
            return join_failure(&e, &request_id);
        }
    };

    let steps = path.hop_count();
    record_route(RouteKind::ShortestPath, &warehouse, path.path.len(), path.distance);
    info!(
        hops = steps,
        distance = path.distance,
        "shortest path computed successfully"
    );

    Response::Success(ServiceResponse::new(ShortestPathResponse {
        path: path.path,
        distance: path.distance,
        steps,
    }))
}

/// Handle POST /api/v1/routing/available-bins requests.
async fn available_bins_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<AvailableBinsRequest>,
) -> Response<AvailableBinsResponse> {
    info!(
        sku = %request.sku,
        quantity = request.quantity,
        "handling available-bins request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        return Response::Error(*problem);
    }

    let AvailableBinsRequest { sku, quantity } = request;
    let lookup_sku = sku.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        find_available_bins(state.inventory(), &lookup_sku, quantity)
    })
    .await;

    let bins = match outcome {
        Ok(Ok(bins)) => bins,
        Ok(Err(e)) => {
            error!(error = %e, "availability lookup failed");
            return Response::Error(from_lib_error(&e, "-", request_id.as_str()));
        }
        Err(e) => return join_failure(&e, &request_id),
    };

    record_bins_found(bins.len(), bins.iter().any(|bin| bin.covers_request));

    Response::Success(ServiceResponse::new(AvailableBinsResponse {
        sku,
        requested_quantity: quantity,
        bins,
    }))
}

fn join_failure<T>(error: &tokio::task::JoinError, request_id: &RequestId) -> Response<T> {
    error!(error = %error, "blocking task failed");
    Response::Error(ProblemDetails::internal_error(
        "request processing was interrupted",
        request_id.as_str(),
    ))
}
