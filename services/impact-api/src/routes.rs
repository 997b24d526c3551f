//! Router construction.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// All routes with the standard middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Ranking and data
        .route(
            "/api/top_changes",
            get(handlers::top_changes::top_changes_handler),
        )
        .route("/api/countries", get(handlers::countries::countries_handler))
        .route(
            "/api/global_heatmap.png",
            get(handlers::heatmap::heatmap_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
