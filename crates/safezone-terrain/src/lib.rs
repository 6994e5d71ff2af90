//! safezone-terrain - Hazard and safe-zone classification
//!
//! Turns a terrain image into a map of usable landing regions:
//!
//! - **Binarization** ([`binarize`]): hazard / safe by a [`HazardPredicate`]
//! - **Smoothing** ([`smooth`]): optional erosion of the safe area
//! - **Linking** ([`HazardLinker`]): strokes that close narrow gaps between
//!   hazard blobs
//! - **Region growing** ([`grow_regions`]): flood fill with small-region
//!   rejection
//! - **Safe zones** ([`detect_safe_zones`]): area and convexity filtered blobs
//! - **Reporting** ([`AreaReport`]): usable share of the raster
//! - **Pipeline** ([`Pipeline`]): all of the above, from file to file
//!
//! # Cell values
//!
//! Working rasters are 8 bpp and hold only the three [`CellState`] values:
//! hazard `0`, visited safe `128`, unvisited safe `255`.
//!
//! # Example
//!
//! ```no_run
//! use safezone_terrain::{Pipeline, PipelineConfig, RunOptions, SafeZoneConfig};
//!
//! let config = PipelineConfig {
//!     zone: SafeZoneConfig::default().with_range(12),
//!     ..Default::default()
//! };
//! let pipeline = Pipeline::new(config)?;
//! let out = pipeline.run_file(
//!     "terrain.png".as_ref(),
//!     "terrain_out.png".as_ref(),
//!     RunOptions::default(),
//! )?;
//! println!("{}", out.report);
//! # Ok::<(), safezone_terrain::TerrainError>(())
//! ```

mod cell;
mod error;

pub mod binarize;
pub mod config;
pub mod detect;
pub mod grow;
pub mod link;
pub mod pipeline;
pub mod report;
pub mod smooth;

pub use cell::CellState;
pub use error::{TerrainError, TerrainResult};

pub use binarize::{HazardPredicate, binarize, invert, threshold_gray};
pub use config::{
    DEFAULT_RANGE, DEFAULT_STROKE_WIDTH, LinkMode, LinkStrategy, SafeZoneConfig, SmoothingConfig,
};
pub use detect::{detect_hazard_blobs, detect_safe_zones, hazard_blob_params, safe_zone_params};
pub use grow::{GrowthReport, grow_regions};
pub use link::{
    Direction, HazardLinker, LinkKind, LinkOutput, LinkSegment, cast_ray, find_border,
    link_hazards,
};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineMode, PipelineOutput, RunOptions, annotate, overlay,
    side_output_path,
};
pub use report::AreaReport;
pub use smooth::smooth;
