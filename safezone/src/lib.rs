//! safezone - Terrain hazard and safe-zone classification
//!
//! Classifies each cell of a terrain image as hazard or safe, closes narrow
//! gaps between hazard regions, discards safe regions too small to use and
//! reports candidate safe zones.
//!
//! # Overview
//!
//! - Raster container, points and drawing ([`Raster`], [`Point`])
//! - Image I/O for PNG, JPEG and PNM ([`io`])
//! - Binary erosion and dilation ([`morph`])
//! - Flood fill, connected components and blobs ([`region`])
//! - The classification pipeline itself ([`terrain`])
//!
//! # Example
//!
//! ```
//! use safezone::terrain::{Pipeline, PipelineConfig, RunOptions};
//! use safezone::{PixelDepth, Raster};
//!
//! // An open 20x20 field is entirely usable
//! let field = Raster::new_filled(20, 20, PixelDepth::Bit8, 255).unwrap();
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let out = pipeline.run(&field, RunOptions::default()).unwrap();
//! assert_eq!(out.report.to_string(), "usable area: 100.00%");
//! ```

// Re-export core types (primary data structures used everywhere)
pub use safezone_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use safezone_io as io;
pub use safezone_morph as morph;
pub use safezone_region as region;
pub use safezone_terrain as terrain;
