use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Wrap every request in an `http_request` span and log its outcome
pub async fn request_tracing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    async move {
        let start_time = Instant::now();
        let response = next.run(request).await;
        let latency_ms = start_time.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if response.status().is_server_error() {
            warn!(status, latency_ms, "Request failed");
        } else {
            info!(status, latency_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
