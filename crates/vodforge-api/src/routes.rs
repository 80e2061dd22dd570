//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::encode::storage_object_finalized;
use crate::handlers::webhook::encoding_finished;
use crate::handlers::{health, ready};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let trigger_routes = Router::new()
        .route("/triggers/storage", post(storage_object_finalized))
        .route("/webhooks/encoding-finished", post(encoding_finished));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let mut router = Router::new().merge(trigger_routes).merge(health_routes);

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    router
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
