//! Success and legacy error bodies.

use serde::Serialize;

/// Message returned when two bins are not connected.
pub const PATH_NOT_FOUND_MESSAGE: &str = "Caminho não encontrado";

/// Successful body: the payload's fields plus `content_type`, mirroring
/// [`crate::ProblemDetails`].
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub content_type: &'static str,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json",
        }
    }
}

/// Bare `{"error": "..."}` body kept for the shortest-path "no path" answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn path_not_found() -> Self {
        Self {
            error: PATH_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}
