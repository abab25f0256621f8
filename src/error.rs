//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Value cannot be null: {param}")]
    NullInput { param: &'static str },

    #[error("File format is not supported.")]
    UnsupportedFormat,

    #[error("Quality must be between 1 and 100.")]
    InvalidQuality(i32),

    #[error("Quality must be an integer between 1 and 100, got '{0}'")]
    UnparsableQuality(String),

    #[error("Image decoding error: {0}")]
    Decode(#[source] image::ImageError),

    #[error("WebP encoding error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conversion timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// Whether the error stems from caller input rather than the image data
    /// or the runtime. Web callers map these to 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NullInput { .. }
                | Error::UnsupportedFormat
                | Error::InvalidQuality(_)
                | Error::UnparsableQuality(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
