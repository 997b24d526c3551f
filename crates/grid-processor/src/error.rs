//! Error types for grid store access.

use climate_common::ClimateError;
use thiserror::Error;

/// Errors raised by a grid store backend.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// The store has no array for this field/quality.
    #[error("field not found: {0}")]
    NotFound(String),

    /// The time index falls outside the field's time axis.
    #[error("time index {time} outside [{start}, {end}) for {field}")]
    TimeOutOfRange {
        field: String,
        time: i64,
        start: i64,
        end: i64,
    },

    /// Failed to open the grid data source.
    #[error("failed to open grid: {0}")]
    OpenFailed(String),

    /// Failed to read data from the grid.
    #[error("failed to read grid data: {0}")]
    ReadFailed(String),

    /// Invalid metadata in the grid store.
    #[error("invalid grid metadata: {0}")]
    InvalidMetadata(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridProcessorError {
    /// Create an OpenFailed error.
    pub fn open_failed(msg: impl Into<String>) -> Self {
        Self::OpenFailed(msg.into())
    }

    /// Create a ReadFailed error.
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}

impl From<std::io::Error> for GridProcessorError {
    fn from(err: std::io::Error) -> Self {
        Self::ReadFailed(err.to_string())
    }
}

/// Every store failure is a `DataUnavailable` to the request.
impl From<GridProcessorError> for ClimateError {
    fn from(err: GridProcessorError) -> Self {
        ClimateError::DataUnavailable(err.to_string())
    }
}

/// Result type for grid store operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
