//! Raster - The main image container
//!
//! The `Raster` structure is the grid every pipeline stage reads and writes.
//! It holds either 8-bit scalar cells (classification states, gray levels)
//! or 32-bit packed colour cells.
//!
//! # Cell layout
//!
//! - One `u32` per cell, stored row-major
//! - `Bit8` cells hold values in `0..=255`
//! - `Bit32` cells are packed `0xRRGGBBAA` (red in MSB), see [`crate::color`]
//! - Coordinates are always `(x, y)` = `(column, row)`
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify cell data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`. A stage that
//! mutates therefore never disturbs the raster it was handed.

mod access;
pub mod blend;
pub mod convert;
pub mod graphics;

pub use blend::blend_weighted;
pub use graphics::{Color, PixelOp};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale or classification states
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// Binary PNM (PGM `P5` / PPM `P6`)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "pnm" | "pgm" | "ppm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
struct RasterData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Samples per pixel: 1 for gray, 3 for RGB, 4 for RGBA
    spp: u32,
    informat: ImageFormat,
    data: Vec<u32>,
}

/// Raster - main image container
///
/// # Examples
///
/// ```
/// use safezone_core::{Raster, PixelDepth};
///
/// let raster = Raster::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions and depth.
    ///
    /// The cell data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Self::new_filled(width, height, depth, 0)
    }

    /// Create a new raster with every cell set to `value`.
    pub fn new_filled(width: u32, height: u32, depth: PixelDepth, value: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let spp = match depth {
            PixelDepth::Bit32 => 3,
            PixelDepth::Bit8 => 1,
        };
        let value = match depth {
            PixelDepth::Bit8 => value.min(255),
            PixelDepth::Bit32 => value,
        };

        let inner = RasterData {
            width,
            height,
            depth,
            spp,
            informat: ImageFormat::Unknown,
            data: vec![value; width as usize * height as usize],
        };

        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Wrap an existing row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, depth: PixelDepth, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(Error::BufferSize {
                len: data.len(),
                width,
                height,
            });
        }
        let spp = match depth {
            PixelDepth::Bit32 => 3,
            PixelDepth::Bit8 => 1,
        };
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                depth,
                spp,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Format the raster was decoded from, if any.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.inner.width) * u64::from(self.inner.height)
    }

    /// Raw row-major cell data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Cells of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Number of live references sharing this raster's data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Create a zeroed raster with the same size and depth.
    pub fn create_template(&self) -> Self {
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                spp: self.inner.spp,
                informat: self.inner.informat,
                data: vec![0; self.inner.data.len()],
            }),
        }
    }

    /// Count cells whose value equals `val`.
    pub fn count_value(&self, val: u32) -> u64 {
        self.inner.data.iter().filter(|&&v| v == val).count() as u64
    }

    /// Try to get mutable access to the cell data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always copies, leaving `self` untouched.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of cell data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Set the samples per pixel (3 or 4 for `Bit32`).
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Record the format the raster was decoded from.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Raw row-major cell data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Mutable raw row-major cell data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 200);
        assert_eq!(raster.depth(), PixelDepth::Bit8);
        assert_eq!(raster.area(), 20_000);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Raster::new(0, 100, PixelDepth::Bit8).is_err());
        assert!(Raster::new(100, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Raster::from_vec(3, 3, PixelDepth::Bit8, vec![0; 8]).is_err());
        let r = Raster::from_vec(3, 3, PixelDepth::Bit8, vec![7; 9]).unwrap();
        assert_eq!(r.count_value(7), 9);
    }

    #[test]
    fn test_clone_shares_data() {
        let raster = Raster::new(10, 10, PixelDepth::Bit8).unwrap();
        let shared = raster.clone();
        assert_eq!(raster.ref_count(), 2);
        assert!(shared.try_into_mut().is_err());
    }

    #[test]
    fn test_to_mut_is_copy_on_write() {
        let raster = Raster::new_filled(4, 4, PixelDepth::Bit8, 255).unwrap();
        let mut working = raster.to_mut();
        working.data_mut().fill(0);
        let working: Raster = working.into();
        assert_eq!(raster.count_value(255), 16);
        assert_eq!(working.count_value(0), 16);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("pgm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_extension("tif"), ImageFormat::Unknown);
    }
}
