//! Rendering errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("image data has {found} values, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("palette has {0} entries, at most 256 allowed")]
    PaletteTooLarge(usize),

    #[error("IDAT compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
