//! Hazard blob extraction and safe-zone detection

use crate::{CellState, SafeZoneConfig, TerrainResult};
use safezone_core::Raster;
use safezone_region::{Blob, BlobParams, ConnectivityType, Foreground, detect_blobs};

/// Blob parameters for hazard regions: every 8-connected hazard component
pub fn hazard_blob_params() -> BlobParams {
    BlobParams {
        target: Foreground::Value(CellState::Hazard.value()),
        connectivity: ConnectivityType::EightWay,
        ..Default::default()
    }
}

/// Blob parameters for safe zones
///
/// Targets non-hazard cells joined 4-way, with an area floor of
/// [`SafeZoneConfig::min_safe_area`] and the configured convexity floor.
pub fn safe_zone_params(config: &SafeZoneConfig) -> BlobParams {
    BlobParams {
        target: Foreground::NonZero,
        connectivity: ConnectivityType::FourWay,
        filter_by_area: true,
        min_area: config.min_safe_area(),
        max_area: f64::MAX,
        filter_by_convexity: true,
        min_convexity: config.min_convexity,
    }
}

/// Extract hazard blobs from a binarized raster
pub fn detect_hazard_blobs(binary: &Raster) -> TerrainResult<Vec<Blob>> {
    Ok(detect_blobs(binary, &hazard_blob_params())?)
}

/// Find candidate safe zones in a cleaned raster
pub fn detect_safe_zones(cleaned: &Raster, config: &SafeZoneConfig) -> TerrainResult<Vec<Blob>> {
    config.validate()?;
    let zones = detect_blobs(cleaned, &safe_zone_params(config))?;
    log::debug!(
        "{} safe zones with area >= {:.2}",
        zones.len(),
        config.min_safe_area()
    );
    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safezone_test::raster_from_ascii;

    #[test]
    fn test_hazard_blobs_eight_way() {
        let r = raster_from_ascii(&["#...", ".#..", "...#"]).unwrap();
        let blobs = detect_hazard_blobs(&r).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].area, 2.0);
    }

    #[test]
    fn test_safe_zone_area_floor() {
        // range 4 -> floor pi * 4 = 12.57
        let r = raster_from_ascii(&["....#..", "....#..", "....#..", "....#.."]).unwrap();
        let config = SafeZoneConfig::default().with_range(4);
        let zones = detect_safe_zones(&r, &config).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].area, 16.0);
        assert!(zones.iter().all(|z| z.area >= config.min_safe_area()));
    }

    #[test]
    fn test_visited_cells_are_safe() {
        let r = raster_from_ascii(&["oooo", "oooo", "oooo", "oooo"]).unwrap();
        let config = SafeZoneConfig::default().with_range(2);
        assert_eq!(detect_safe_zones(&r, &config).unwrap().len(), 1);
    }
}
