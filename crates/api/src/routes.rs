use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Base path of every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/scenarios", get(handlers::list_scenarios))
        .route("/simulations", post(handlers::run_simulation))
        .route("/events", get(handlers::events))
        .route("/impact", post(handlers::impact))
        .route("/price/live", get(handlers::live_price))
        .route("/price/snapshots", get(handlers::snapshots));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
