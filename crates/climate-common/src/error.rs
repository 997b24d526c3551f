//! Error types for climate impact requests.

use thiserror::Error;

/// Result type alias using ClimateError.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Request-level error taxonomy.
///
/// Collaborator failures (`DataUnavailable`, `BoundaryNotReady`) abort the
/// whole ranking computation. Numeric degeneracy inside a single country is
/// never an error and has no variant here.
#[derive(Debug, Error)]
pub enum ClimateError {
    // === Collaborator Errors ===
    #[error("Data not available: {0}")]
    DataUnavailable(String),

    #[error("Countries not loaded yet")]
    BoundaryNotReady,

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // === Computation Errors ===
    #[error("Grid shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClimateError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ClimateError::InvalidParameter { .. } | ClimateError::InvalidDate(_) => 400,

            ClimateError::DataUnavailable(_) => 404,

            ClimateError::BoundaryNotReady => 503,

            ClimateError::ShapeMismatch { .. } | ClimateError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ClimateError {
    fn from(err: serde_json::Error) -> Self {
        ClimateError::Internal(format!("JSON error: {}", err))
    }
}
