//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs one line per request; server errors at warn, everything else at info.
///
/// The query string is left out: it carries tokens and client ids.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), elapsed_ms, "HTTP request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "HTTP request");
    }

    response
}
