use crate::config::AppMode;
use crate::errors::panic_response;
use crate::handlers::{self, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Builds the HTTP surface.
///
/// `mode` is taken explicitly rather than read from process-wide state:
/// request tracing is attached in `debug` and `release`, left off in `test`.
pub fn build_router(state: Arc<AppState>, mode: AppMode) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/temperature/:cep", get(handlers::get_temperature))
        .route(
            "/api/v1/temperature/",
            get(handlers::get_temperature_without_cep),
        )
        .route(
            "/api/v1/temperature",
            get(handlers::get_temperature_without_cep),
        );

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/readiness", get(handlers::readiness))
        .merge(api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(CorsLayer::permissive()),
        );

    match mode {
        AppMode::Test => app,
        AppMode::Debug | AppMode::Release => app.layer(TraceLayer::new_for_http()),
    }
}
