//! Access log for the catalog API

use axum::{body::Body, http::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// How a finished request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Served,
    Rejected,
    Failed,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Outcome::Failed
        } else if status.is_client_error() {
            Outcome::Rejected
        } else {
            Outcome::Served
        }
    }
}

/// Runs the request inside a `request` span and emits one access line.
///
/// Handler events (product created, login refused, ...) nest under the span,
/// so they carry the method and path too. Server errors log at WARN.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let span = info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    );

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status = response.status();
    span.in_scope(|| match Outcome::of(status) {
        Outcome::Failed => warn!(status = status.as_u16(), elapsed_ms, "Request failed"),
        Outcome::Rejected => info!(status = status.as_u16(), elapsed_ms, "Request rejected"),
        Outcome::Served => info!(status = status.as_u16(), elapsed_ms, "Request served"),
    });

    response
}
