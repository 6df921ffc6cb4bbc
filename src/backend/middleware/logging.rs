/**
 * Request Logging Middleware
 *
 * Opens a span per request carrying a fresh request id, the method and the
 * path, and logs the response status and latency when the request
 * completes. Everything logged by inner middleware and handlers lands in
 * that span.
 */

use std::time::Instant;

use axum::extract::Request;
use tracing::Instrument;
use uuid::Uuid;

use crate::backend::routes::chain::{from_fn, Middleware};

/// Per-request span and completion log
pub fn request_logging() -> Middleware {
    from_fn(|req: Request, next| async move {
        let span = tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path(),
        );

        async move {
            let started = Instant::now();
            let response = next(req).await;
            let status = response.status();
            let latency_ms = started.elapsed().as_millis() as u64;

            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), latency_ms, "Request failed");
            } else {
                tracing::info!(status = status.as_u16(), latency_ms, "Request completed");
            }
            response
        }
        .instrument(span)
        .await
    })
}
