//! RFC 9457 Problem Details bodies for routing errors.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use wms_lib::Error as LibError;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// The problem types this service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    InvalidRequest,
    UnknownLocation,
    WarehouseNotFound,
    RouteNotFound,
    ServiceUnavailable,
    InternalError,
}

impl ProblemKind {
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "/problems/invalid-request",
            ProblemKind::UnknownLocation => "/problems/unknown-location",
            ProblemKind::WarehouseNotFound => "/problems/warehouse-not-found",
            ProblemKind::RouteNotFound => "/problems/route-not-found",
            ProblemKind::ServiceUnavailable => "/problems/service-unavailable",
            ProblemKind::InternalError => "/problems/internal-error",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownLocation => "Unknown Location",
            ProblemKind::WarehouseNotFound => "Warehouse Not Found",
            ProblemKind::RouteNotFound => "Route Not Found",
            ProblemKind::ServiceUnavailable => "Service Unavailable",
            ProblemKind::InternalError => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest | ProblemKind::UnknownLocation => StatusCode::BAD_REQUEST,
            ProblemKind::WarehouseNotFound | ProblemKind::RouteNotFound => StatusCode::NOT_FOUND,
            ProblemKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ProblemKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body; `instance` carries the request id.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    pub content_type: &'static str,
}

impl ProblemDetails {
    pub fn new(kind: ProblemKind, detail: impl Into<String>, request_id: &str) -> Self {
        Self {
            type_uri: kind.type_uri(),
            title: kind.title(),
            status: kind.status().as_u16(),
            detail: detail.into(),
            instance: request_id.to_string(),
            content_type: PROBLEM_CONTENT_TYPE,
        }
    }

    pub fn bad_request(detail: impl Into<String>, request_id: &str) -> Self {
        Self::new(ProblemKind::InvalidRequest, detail, request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: &str) -> Self {
        Self::new(ProblemKind::InternalError, detail, request_id)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Map a routing library error onto the problem a client should see.
///
/// `warehouse` is the warehouse the request named; it is quoted in details
/// for bin-level errors so callers can tell which layout rejected the code.
pub fn from_lib_error(error: &LibError, warehouse: &str, request_id: &str) -> ProblemDetails {
    let (kind, detail) = match error {
        LibError::WarehouseNotFound { warehouse_id } => (
            ProblemKind::WarehouseNotFound,
            format!("Warehouse '{warehouse_id}' not found"),
        ),
        LibError::UnknownLocation { code } => (
            ProblemKind::UnknownLocation,
            format!("Bin '{code}' is not part of warehouse '{warehouse}'"),
        ),
        LibError::InvalidLocationCode { .. } => (ProblemKind::InvalidRequest, error.to_string()),
        LibError::NoPathFound { start, goal } => (
            ProblemKind::RouteNotFound,
            format!("No route exists from '{start}' to '{goal}' in warehouse '{warehouse}'"),
        ),
        LibError::DatabaseNotFound { .. } | LibError::UnsupportedSchema => (
            ProblemKind::ServiceUnavailable,
            "Warehouse database is not available".to_string(),
        ),
        _ => (ProblemKind::InternalError, error.to_string()),
    };
    ProblemDetails::new(kind, detail, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_follows_rfc_9457_field_names() {
        let problem = ProblemDetails::bad_request("bin_codes is empty", "req-1");
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], "/problems/invalid-request");
        assert_eq!(json["title"], "Invalid Request");
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "bin_codes is empty");
        assert_eq!(json["instance"], "req-1");
    }

    #[test]
    fn response_uses_problem_content_type_and_status() {
        let error = LibError::NoPathFound {
            start: "A-01-01-A".to_string(),
            goal: "A-01-01-B".to_string(),
        };
        let response = from_lib_error(&error, "wh-sp-01", "req-2").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROBLEM_CONTENT_TYPE
        );
    }

    #[test]
    fn bin_errors_name_the_warehouse() {
        let error = LibError::UnknownLocation {
            code: "Z-09-01-A".to_string(),
        };
        let problem = from_lib_error(&error, "wh-rj-02", "req-3");

        assert_eq!(problem.type_uri, ProblemKind::UnknownLocation.type_uri());
        assert_eq!(problem.status, 400);
        assert_eq!(
            problem.detail,
            "Bin 'Z-09-01-A' is not part of warehouse 'wh-rj-02'"
        );
    }

    #[test]
    fn storage_errors_are_unavailable_without_leaking_paths() {
        let error = LibError::DatabaseNotFound {
            path: "/data/wms.db".into(),
        };
        let problem = from_lib_error(&error, "wh-sp-01", "req-4");

        assert_eq!(problem.status, 503);
        assert!(!problem.detail.contains("/data"));
        assert_eq!(
            from_lib_error(&LibError::UnsupportedSchema, "wh-sp-01", "req-5").status,
            503
        );
    }

    #[test]
    fn unknown_warehouse_is_not_found() {
        let error = LibError::WarehouseNotFound {
            warehouse_id: "wh-x".to_string(),
        };
        let problem = from_lib_error(&error, "wh-x", "req-6");
        assert_eq!(problem.type_uri, "/problems/warehouse-not-found");
        assert_eq!(problem.status, 404);
    }
}
