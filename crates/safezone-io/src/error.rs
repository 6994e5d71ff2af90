//! Error types for safezone-io

use thiserror::Error;

/// Errors raised while reading or writing an image
#[derive(Error, Debug)]
pub enum IoError {
    /// File system failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Format not recognised, or its feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Header or payload does not describe a valid image
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// PNG or JPEG decoder failure
    #[error("decode error: {0}")]
    DecodeError(String),

    /// PNG or JPEG encoder failure
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Raster construction failure
    #[error(transparent)]
    Core(#[from] safezone_core::Error),
}

/// Result type for image I/O
pub type IoResult<T> = Result<T, IoError>;
