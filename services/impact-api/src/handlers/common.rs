//! Helpers shared by the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_common::{ClimateError, ClimateResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON `{"error": ...}` with the status the error maps to.
pub fn error_response(err: &ClimateError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// The value, or the default when the parameter is absent or blank.
pub fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Parse an optional numeric parameter.
pub fn parse_number<T: std::str::FromStr>(
    param: &str,
    value: Option<&str>,
    default: T,
) -> ClimateResult<T> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|_| {
            ClimateError::invalid_parameter(param, format!("'{}' is not a valid number", v))
        }),
    }
}
