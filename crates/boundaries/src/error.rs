//! Error types for boundary loading.

use thiserror::Error;

/// Errors raised while fetching or parsing country boundaries.
///
/// These never reach a request: the loader logs them and the store stays
/// unready.
#[derive(Error, Debug)]
pub enum BoundaryError {
    #[error("failed to fetch boundaries: {0}")]
    Fetch(String),

    #[error("failed to read boundaries file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid boundary GeoJSON: {0}")]
    Parse(String),

    #[error("boundary set already published")]
    AlreadyPublished,

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl From<reqwest::Error> for BoundaryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for BoundaryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoundaryError>;
