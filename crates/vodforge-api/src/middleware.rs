//! API middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

use crate::metrics::record_http_request;

/// Attach a request id to the request and the response for correlation.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    if let Ok(value) = HeaderValue::from_str(&id) {
        request.headers_mut().insert("x-request-id", value);
    }

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Log method, path, status and latency for every request, and feed the
/// HTTP metrics.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let latency = started.elapsed();
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "request"
    );
    record_http_request(method.as_str(), &path, response.status().as_u16(), latency.as_secs_f64());

    response
}

/// Baseline security headers on every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert("cache-control", HeaderValue::from_static("no-store"));

    response
}

/// CORS layer from the configured origins; `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> =
            origins.iter().filter_map(|o| o.parse::<HeaderValue>().ok()).collect();
        CorsLayer::new().allow_origin(parsed).allow_methods(Any).allow_headers(Any)
    }
}
