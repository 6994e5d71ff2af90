//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a raster
    #[error("failed to write raster '{path}': {message}")]
    RasterWrite { path: String, message: String },

    /// An ASCII fixture was malformed
    #[error("bad fixture: {0}")]
    Fixture(String),

    /// Core library error
    #[error(transparent)]
    Core(#[from] safezone_core::Error),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
