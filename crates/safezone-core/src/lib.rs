//! safezone-core - Basic data structures for terrain rasters
//!
//! This crate provides the fundamental data structures used throughout
//! the safezone workspace:
//!
//! - [`Raster`] / [`RasterMut`] - The main grid container (immutable / mutable)
//! - [`Point`] / [`PointF`] - Pixel and sub-pixel coordinates
//! - Line and circle rendering, weighted blending, depth conversion
//! - [`Error`] / [`Result`] - The crate error type

pub mod error;
pub mod point;
pub mod raster;

pub use error::{Error, Result};
pub use point::{Point, PointF};
pub use raster::graphics::{
    generate_circle_points, generate_line_points, generate_wide_line_points,
};
pub use raster::{Color, ImageFormat, PixelDepth, PixelOp, Raster, RasterMut, blend_weighted};

/// Channel packing for 32-bpp cells
///
/// A colour cell is stored as `0xRRGGBBAA`.
pub mod color {
    /// Pack opaque RGB
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Pack RGBA
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Unpack RGB, dropping alpha
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        let [r, g, b, _] = pixel.to_be_bytes();
        (r, g, b)
    }

    /// Unpack RGBA
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = pixel.to_be_bytes();
        (r, g, b, a)
    }

    /// Rounded BT.601 luma
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
        ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500) / 1000) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_channel_order() {
            assert_eq!(compose_rgb(0x12, 0x34, 0x56), 0x123456ff);
            assert_eq!(extract_rgba(compose_rgba(1, 2, 3, 4)), (1, 2, 3, 4));
            assert_eq!(extract_rgb(0xaabbcc00), (0xaa, 0xbb, 0xcc));
        }

        #[test]
        fn test_luminance() {
            assert_eq!(luminance(0, 0, 0), 0);
            assert_eq!(luminance(255, 255, 255), 255);
            assert_eq!(luminance(100, 100, 100), 100);
            assert_eq!(luminance(255, 0, 0), 76);
        }
    }
}
