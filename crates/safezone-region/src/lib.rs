//! safezone-region - Region analysis
//!
//! This crate provides region analysis over 8-bpp rasters:
//!
//! - **Seed fill** ([`floodfill`]): recolour a connected same-valued region
//! - **Connected components** ([`find_connected_components`]): 4- or 8-way
//! - **Convex hulls** ([`convex_hull_area`]): hull area over pixel corners
//! - **Blobs** ([`detect_blobs`]): centroid, area and convexity with filters

mod error;

pub mod blob;
pub mod conncomp;
pub mod hull;
pub mod seedfill;

pub use error::{RegionError, RegionResult};

pub use blob::{Blob, BlobParams, detect_blobs};
pub use conncomp::{
    BoundingBox, ConnectedComponent, ConnectivityType, Foreground, count_components,
    find_connected_components,
};
pub use hull::{convex_hull, convex_hull_area, polygon_area};
pub use seedfill::floodfill;
