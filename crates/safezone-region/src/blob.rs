//! Blob detection
//!
//! A blob is a connected component summarised by its centroid, pixel area,
//! convexity (area over convex hull area) and bounding box. [`detect_blobs`]
//! extracts the components selected by [`BlobParams`] and applies the
//! area and convexity filters.

use crate::conncomp::{BoundingBox, ConnectivityType, Foreground, find_connected_components};
use crate::error::{RegionError, RegionResult};
use crate::hull::convex_hull_area;
use safezone_core::{PointF, Raster};

/// Summary of one connected region
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Mean position of the member pixels
    pub centroid: PointF,
    /// Pixel count
    pub area: f64,
    /// `area / hull area`, in `(0, 1]`
    pub convexity: f64,
    /// Bounding box
    pub bounds: BoundingBox,
}

impl Blob {
    /// Diameter of the disc with the same area
    pub fn diameter(&self) -> f64 {
        2.0 * (self.area / std::f64::consts::PI).sqrt()
    }
}

/// Blob extraction and filtering parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BlobParams {
    /// Cells that form blobs
    pub target: Foreground,
    /// How cells join into blobs
    pub connectivity: ConnectivityType,
    /// Enable the area filter
    pub filter_by_area: bool,
    /// Smallest accepted area (inclusive)
    pub min_area: f64,
    /// Largest accepted area (inclusive)
    pub max_area: f64,
    /// Enable the convexity filter
    pub filter_by_convexity: bool,
    /// Smallest accepted convexity (inclusive)
    pub min_convexity: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            target: Foreground::NonZero,
            connectivity: ConnectivityType::FourWay,
            filter_by_area: false,
            min_area: 0.0,
            max_area: f64::MAX,
            filter_by_convexity: false,
            min_convexity: 0.0,
        }
    }
}

impl BlobParams {
    /// Check the filter ranges
    pub fn validate(&self) -> RegionResult<()> {
        if self.filter_by_area && !(self.min_area >= 0.0 && self.min_area <= self.max_area) {
            return Err(RegionError::InvalidParameters(format!(
                "area range {}..={} is empty or negative",
                self.min_area, self.max_area
            )));
        }
        if self.filter_by_convexity && !(0.0..=1.0).contains(&self.min_convexity) {
            return Err(RegionError::InvalidParameters(format!(
                "min convexity {} outside 0..=1",
                self.min_convexity
            )));
        }
        Ok(())
    }

    fn accepts(&self, area: f64, convexity: f64) -> bool {
        if self.filter_by_area && (area < self.min_area || area > self.max_area) {
            return false;
        }
        if self.filter_by_convexity && convexity < self.min_convexity {
            return false;
        }
        true
    }
}

/// Detect blobs in an 8-bpp raster
///
/// Blobs are returned in discovery order (row-major by first pixel).
pub fn detect_blobs(raster: &Raster, params: &BlobParams) -> RegionResult<Vec<Blob>> {
    params.validate()?;

    let components = find_connected_components(raster, params.target, params.connectivity)?;
    let found = components.len();

    let blobs: Vec<Blob> = components
        .into_iter()
        .filter_map(|comp| {
            let area = comp.pixel_count() as f64;
            let hull = convex_hull_area(&comp.pixels);
            let convexity = if hull > 0.0 { area / hull } else { 1.0 };
            params.accepts(area, convexity).then(|| Blob {
                centroid: comp.centroid(),
                area,
                convexity,
                bounds: comp.bounds,
            })
        })
        .collect();

    log::debug!(
        "{} components of {:?}, {} blobs after filtering",
        found,
        params.target,
        blobs.len()
    );
    Ok(blobs)
}
