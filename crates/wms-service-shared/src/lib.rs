//! Shared infrastructure for the warehouse routing HTTP services.
//!
//! This crate provides common functionality used by the service binaries:
//!
//! - [`AppState`]: Injected repositories plus the optional graph cache
//! - [`ServiceConfig`]: Database path, port and cache settings from the environment
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all business logic resides
//! in `wms-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call wms-lib APIs on the blocking pool                   │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a demo-warehouse state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_bins_found, record_graph_build, record_route,
    record_route_failed, MetricsConfig, MetricsError, RouteKind,
};
pub use middleware::{record_route_context, MetricsLayer, RequestId};
pub use problem::{from_lib_error, ProblemDetails, ProblemKind};
pub use request::{AvailableBinsRequest, PickingRouteRequest, ShortestPathRequest, Validate};
pub use response::{ErrorPayload, ServiceResponse, PATH_NOT_FOUND_MESSAGE};
pub use state::{AppState, AppStateError};
