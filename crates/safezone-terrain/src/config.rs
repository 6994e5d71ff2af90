//! Terrain classification parameters

use crate::{TerrainError, TerrainResult};
use safezone_morph::KernelType;

/// Default linking distance and noise threshold
pub const DEFAULT_RANGE: u32 = 10;

/// Default width of linking strokes
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// How two hazard blobs qualify for a pairwise link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Centroids closer than `range`
    #[default]
    Centroid,
    /// Facing border pixels closer than `2 * range`; rays scan twice as far
    Border,
}

/// Which cardinal rays are cast per blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStrategy {
    /// Cast all four rays
    #[default]
    AllDirections,
    /// Stop at the first ray that draws a stroke
    FirstSuccess,
}

/// Parameters of the linking, growing and detection stages
#[derive(Debug, Clone, PartialEq)]
pub struct SafeZoneConfig {
    /// Link distance and minimum region area, in pixels
    pub range: u32,
    /// Lower bound on safe-zone convexity, in `0.0..=1.0`
    pub min_convexity: f64,
    /// Pairwise link rule
    pub link_mode: LinkMode,
    /// Ray casting rule
    pub link_strategy: LinkStrategy,
    /// Width of drawn strokes, in pixels
    pub stroke_width: u32,
}

impl Default for SafeZoneConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            min_convexity: 0.0,
            link_mode: LinkMode::default(),
            link_strategy: LinkStrategy::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl SafeZoneConfig {
    /// Set the range
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    /// Set the convexity lower bound
    pub fn with_min_convexity(mut self, min_convexity: f64) -> Self {
        self.min_convexity = min_convexity;
        self
    }

    /// Set the pairwise link rule
    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    /// Set the ray casting rule
    pub fn with_link_strategy(mut self, link_strategy: LinkStrategy) -> Self {
        self.link_strategy = link_strategy;
        self
    }

    /// Set the stroke width
    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] for a zero range or stroke
    /// width, or a convexity bound outside `0.0..=1.0`.
    pub fn validate(&self) -> TerrainResult<()> {
        if self.range == 0 {
            return Err(TerrainError::InvalidConfig(
                "range must be at least 1".to_string(),
            ));
        }
        if self.stroke_width == 0 {
            return Err(TerrainError::InvalidConfig(
                "stroke width must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_convexity) {
            return Err(TerrainError::InvalidConfig(format!(
                "min convexity {} outside 0..=1",
                self.min_convexity
            )));
        }
        Ok(())
    }

    /// Smallest safe-zone area: a disc of diameter `range`
    pub fn min_safe_area(&self) -> f64 {
        let r = f64::from(self.range) / 2.0;
        std::f64::consts::PI * r * r
    }

    /// How far a ray scans past the first safe cell
    pub(crate) fn ray_scan_len(&self) -> u32 {
        match self.link_mode {
            LinkMode::Centroid => self.range.saturating_sub(1),
            LinkMode::Border => self.range.saturating_mul(2).saturating_sub(1),
        }
    }
}

/// Parameters of the optional erosion stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingConfig {
    /// Side length of the structuring element
    pub kernel_size: u32,
    /// Shape of the structuring element
    pub kernel_type: KernelType,
    /// Number of successive erosions
    pub erosion_count: u32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            kernel_type: KernelType::Rect,
            erosion_count: 1,
        }
    }
}

impl SmoothingConfig {
    /// Set the kernel size
    pub fn with_kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    /// Set the kernel shape
    pub fn with_kernel_type(mut self, kernel_type: KernelType) -> Self {
        self.kernel_type = kernel_type;
        self
    }

    /// Set the erosion count
    pub fn with_erosion_count(mut self, erosion_count: u32) -> Self {
        self.erosion_count = erosion_count;
        self
    }

    /// Check every field
    pub fn validate(&self) -> TerrainResult<()> {
        if self.kernel_size == 0 {
            return Err(TerrainError::InvalidConfig(
                "kernel size must be at least 1".to_string(),
            ));
        }
        if self.erosion_count == 0 {
            return Err(TerrainError::InvalidConfig(
                "erosion count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let c = SafeZoneConfig::default();
        assert_eq!(c.range, 10);
        assert_eq!(c.stroke_width, 2);
        assert!(c.validate().is_ok());
        assert!(SmoothingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_range_rejected() {
        let c = SafeZoneConfig::default().with_range(0);
        assert!(matches!(c.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn test_convexity_bounds() {
        assert!(
            SafeZoneConfig::default()
                .with_min_convexity(1.5)
                .validate()
                .is_err()
        );
        assert!(
            SafeZoneConfig::default()
                .with_min_convexity(1.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_smoothing_bounds() {
        assert!(
            SmoothingConfig::default()
                .with_kernel_size(0)
                .validate()
                .is_err()
        );
        assert!(
            SmoothingConfig::default()
                .with_erosion_count(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_min_safe_area() {
        let c = SafeZoneConfig::default().with_range(5);
        assert!((c.min_safe_area() - std::f64::consts::PI * 6.25).abs() < 1e-9);
    }

    #[test]
    fn test_ray_scan_len() {
        let c = SafeZoneConfig::default();
        assert_eq!(c.ray_scan_len(), 9);
        assert_eq!(c.with_link_mode(LinkMode::Border).ray_scan_len(), 19);
    }

    #[test]
    fn test_ray_scan_len_saturates() {
        let c = SafeZoneConfig::default()
            .with_range(u32::MAX)
            .with_link_mode(LinkMode::Border);
        assert_eq!(c.ray_scan_len(), u32::MAX - 1);
        let c = c.with_range(3_000_000_000);
        assert_eq!(c.ray_scan_len(), u32::MAX - 1);
        assert_eq!(c.with_range(1).ray_scan_len(), 1);
    }
}
