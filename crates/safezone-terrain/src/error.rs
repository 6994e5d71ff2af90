//! Error types for safezone-terrain

use thiserror::Error;

/// Errors that can occur while classifying terrain
#[derive(Debug, Error)]
pub enum TerrainError {
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Core library error
    #[error(transparent)]
    Core(#[from] safezone_core::Error),

    /// Region analysis error
    #[error(transparent)]
    Region(#[from] safezone_region::RegionError),

    /// Morphology error
    #[error(transparent)]
    Morph(#[from] safezone_morph::MorphError),

    /// Image I/O error
    #[error(transparent)]
    Io(#[from] safezone_io::IoError),
}

/// Result type for terrain operations
pub type TerrainResult<T> = Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use safezone_io::IoError;
    use std::error::Error as _;

    #[test]
    fn test_wrapped_errors_print_once() {
        let e = TerrainError::from(IoError::UnsupportedFormat("bmp".into()));
        assert_eq!(e.to_string(), "unsupported format: bmp");
        assert!(e.source().is_none());

        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let e = TerrainError::from(IoError::from(inner));
        assert_eq!(e.to_string(), "no such file");
        assert!(e.source().is_none());
    }
}
