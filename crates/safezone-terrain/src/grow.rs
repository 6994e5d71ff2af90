//! Region growing with area-based noise rejection
//!
//! Every unvisited safe cell seeds a 4-connected flood fill. Regions of at
//! least `range` cells are kept as [`CellState::VisitedSafe`]; smaller ones
//! are refilled as [`CellState::Hazard`].

use crate::cell::require_gray;
use crate::{CellState, TerrainError, TerrainResult};
use safezone_core::Raster;
use safezone_region::{ConnectivityType, floodfill};

/// Region areas found by [`grow_regions`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthReport {
    /// Cells in kept regions
    pub usable_pixels: u64,
    /// Cells in the raster
    pub total_pixels: u64,
    /// Area of each kept region, in discovery order
    pub kept_areas: Vec<u32>,
    /// Area of each region turned into hazard, in discovery order
    pub rejected_areas: Vec<u32>,
}

/// Grow, measure and filter every safe region
///
/// Cells valued [`CellState::UnvisitedSafe`] are the only seeds; anything
/// else is left as it is. The returned raster holds no unvisited cells.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidConfig`] if `range` is zero.
pub fn grow_regions(raster: &Raster, range: u32) -> TerrainResult<(Raster, GrowthReport)> {
    if range == 0 {
        return Err(TerrainError::InvalidConfig(
            "range must be at least 1".to_string(),
        ));
    }
    require_gray(raster)?;

    let unvisited = CellState::UnvisitedSafe.value();
    let visited = CellState::VisitedSafe.value();
    let hazard = CellState::Hazard.value();
    let w = raster.width();

    let mut working = raster.to_mut();
    let mut report = GrowthReport {
        total_pixels: raster.area(),
        ..Default::default()
    };

    for idx in 0..working.data().len() {
        if working.data()[idx] != unvisited {
            continue;
        }
        let x = idx as u32 % w;
        let y = idx as u32 / w;

        let area = floodfill(&mut working, x, y, visited, ConnectivityType::FourWay)?;
        if area < range {
            floodfill(&mut working, x, y, hazard, ConnectivityType::FourWay)?;
            report.rejected_areas.push(area);
        } else {
            report.usable_pixels += u64::from(area);
            report.kept_areas.push(area);
        }
    }

    log::debug!(
        "grew {} regions: {} kept ({} cells), {} rejected",
        report.kept_areas.len() + report.rejected_areas.len(),
        report.kept_areas.len(),
        report.usable_pixels,
        report.rejected_areas.len()
    );
    Ok((working.into(), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use safezone_test::{raster_from_ascii, raster_to_ascii};

    #[test]
    fn test_small_pocket_rejected() {
        let r = raster_from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let (out, report) = grow_regions(&r, 10).unwrap();
        assert_eq!(out.count_value(0), 25);
        assert_eq!(report.usable_pixels, 0);
        assert_eq!(report.rejected_areas, vec![9]);
        assert!(report.kept_areas.is_empty());
    }

    #[test]
    fn test_regions_kept_and_rejected() {
        let r = raster_from_ascii(&["....#..", "....#..", "....#.."]).unwrap();
        let (out, report) = grow_regions(&r, 7).unwrap();
        assert_eq!(
            raster_to_ascii(&out),
            vec!["oooo###", "oooo###", "oooo###"]
        );
        assert_eq!(report.kept_areas, vec![12]);
        assert_eq!(report.rejected_areas, vec![6]);
        assert_eq!(report.usable_pixels, 12);
        assert_eq!(report.total_pixels, 21);
    }

    #[test]
    fn test_range_equal_to_area_is_kept() {
        let r = raster_from_ascii(&["...#"]).unwrap();
        let (_, report) = grow_regions(&r, 3).unwrap();
        assert_eq!(report.kept_areas, vec![3]);
    }

    #[test]
    fn test_diagonal_cells_are_separate_regions() {
        let r = raster_from_ascii(&[".#", "#."]).unwrap();
        let (_, report) = grow_regions(&r, 1).unwrap();
        assert_eq!(report.kept_areas, vec![1, 1]);
    }

    #[test]
    fn test_no_unvisited_left() {
        let r = raster_from_ascii(&["..#..", "#.#.#", "..#..", "#####", "....."]).unwrap();
        for range in 1..8 {
            let (out, report) = grow_regions(&r, range).unwrap();
            assert_eq!(out.count_value(255), 0);
            assert!(report.usable_pixels <= report.total_pixels);
            assert!(report.kept_areas.iter().all(|&a| a >= range));
            assert!(report.rejected_areas.iter().all(|&a| a < range));
        }
    }

    #[test]
    fn test_zero_range_rejected() {
        let r = raster_from_ascii(&["."]).unwrap();
        assert!(matches!(
            grow_regions(&r, 0),
            Err(TerrainError::InvalidConfig(_))
        ));
    }
}
