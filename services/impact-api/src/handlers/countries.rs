//! Country boundary handler.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};
use climate_common::ClimateError;

use crate::handlers::common::error_response;
use crate::metrics::Endpoint;
use crate::state::AppState;

/// GET /api/countries - The boundary GeoJSON exactly as loaded
pub async fn countries_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    state.metrics.record_request(Endpoint::Countries);

    match state.boundaries.get() {
        Some(set) => (
            [(header::CONTENT_TYPE, "application/json")],
            set.raw().clone(),
        )
            .into_response(),
        None => {
            let err = ClimateError::BoundaryNotReady;
            state
                .metrics
                .record_error(Endpoint::Countries, err.http_status_code());
            error_response(&err)
        }
    }
}
