//! Usable-area reporting

use crate::GrowthReport;
use std::fmt;

/// Usable share of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaReport {
    /// Cells in kept safe regions
    pub usable_pixels: u64,
    /// Cells in the raster
    pub total_pixels: u64,
}

impl AreaReport {
    /// Sum kept region areas over a `rows` x `cols` raster
    pub fn from_areas(kept: &[u32], rows: u32, cols: u32) -> Self {
        Self {
            usable_pixels: kept.iter().map(|&a| u64::from(a)).sum(),
            total_pixels: u64::from(rows) * u64::from(cols),
        }
    }

    /// Take the totals from a growth pass
    pub fn from_growth(growth: &GrowthReport) -> Self {
        Self {
            usable_pixels: growth.usable_pixels,
            total_pixels: growth.total_pixels,
        }
    }

    /// `100 * usable / total`; zero for an empty raster
    pub fn percentage(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        100.0 * self.usable_pixels as f64 / self.total_pixels as f64
    }
}

impl fmt::Display for AreaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usable area: {:.2}%", self.percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_areas() {
        let r = AreaReport::from_areas(&[100, 50], 20, 20);
        assert_eq!(r.usable_pixels, 150);
        assert_eq!(r.total_pixels, 400);
        assert!((r.percentage() - 37.5).abs() < 1e-9);
        assert_eq!(r.to_string(), "usable area: 37.50%");
    }

    #[test]
    fn test_from_growth_matches_from_areas() {
        let growth = GrowthReport {
            usable_pixels: 30,
            total_pixels: 90,
            kept_areas: vec![10, 20],
            rejected_areas: vec![3],
        };
        assert_eq!(
            AreaReport::from_growth(&growth),
            AreaReport::from_areas(&growth.kept_areas, 9, 10)
        );
        assert_eq!(
            AreaReport::from_growth(&growth).to_string(),
            "usable area: 33.33%"
        );
    }

    #[test]
    fn test_full_and_empty() {
        assert_eq!(
            AreaReport::from_areas(&[400], 20, 20).to_string(),
            "usable area: 100.00%"
        );
        assert_eq!(
            AreaReport::from_areas(&[], 20, 20).to_string(),
            "usable area: 0.00%"
        );
        assert_eq!(AreaReport::from_areas(&[], 0, 0).percentage(), 0.0);
    }
}
