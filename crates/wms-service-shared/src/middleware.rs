//! Request tracking for the routing service.
//!
//! [`MetricsLayer`] wraps the router. For every request it picks a
//! [`RequestId`] (the `X-Request-ID` header or a fresh UUID v7), opens a
//! `request` span, records HTTP metrics by matched route, and echoes the id
//! back in the response headers. Handlers fill the span's `warehouse` and
//! `bins` fields through [`record_route_context`].

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{field, info_span, Span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The caller's `X-Request-ID`, or a fresh id when it is missing or not text.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(Self::generate, Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Self>().cloned().unwrap_or_else(Self::generate)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the id chosen by [`MetricsLayer`]; without the layer a new one is made.
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

/// Attach the warehouse and the number of bins involved to the current request span.
pub fn record_route_context(warehouse: &str, bins: usize) {
    let span = Span::current();
    span.record("warehouse", warehouse);
    span.record("bins", bins);
}

fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Route template for metric labels; unmatched paths share one series.
fn route_label(extensions: &Extensions) -> String {
    extensions
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |path| path.as_str().to_string())
}

/// Tower layer adding request ids, the request span and HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let request_id = RequestId::from_headers(req.headers());
        req.extensions_mut().insert(request_id.clone());

        let method = req.method().to_string();
        let route = route_label(req.extensions());
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            route = %route,
            warehouse = field::Empty,
            bins = field::Empty,
            status = field::Empty,
        );

        MetricsFuture {
            inner: span.in_scope(|| self.inner.call(req)),
            start: Instant::now(),
            method,
            route,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Completes the request span and metrics when the inner response is ready.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        route: String,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let elapsed = this.start.elapsed().as_secs_f64();
        let status = match &mut result {
            Ok(response) => {
                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                response.status().as_u16()
            }
            Err(_) => 500,
        };
        this.span.record("status", status);

        metrics::counter!(
            "http_requests_total",
            "method" => this.method.clone(),
            "route" => this.route.clone(),
            "status" => status_class(status)
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "route" => this.route.clone()
        )
        .record(elapsed);

        if status >= 500 {
            tracing::error!(latency_ms = elapsed * 1000.0, "request failed");
        } else {
            tracing::info!(latency_ms = elapsed * 1000.0, "request completed");
        }
        Poll::Ready(result)
    }
}
