//! Pixel access functions
//!
//! Bounds-checked getters and setters for individual cells. The signed
//! variants (`pixel_at`) let ray casts step past the raster edge and simply
//! observe `None` instead of wrapping or panicking.

use super::{PixelDepth, Raster, RasterMut};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

#[inline]
fn in_bounds(width: u32, height: u32, x: i64, y: i64) -> bool {
    x >= 0 && y >= 0 && x < i64::from(width) && y < i64::from(height)
}

impl Raster {
    /// Get a cell value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Get a cell value at signed coordinates.
    ///
    /// Returns `None` for any position outside the raster, including
    /// negative coordinates.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<u32> {
        if !in_bounds(self.width(), self.height(), x.into(), y.into()) {
            return None;
        }
        Some(self.data()[index(self.width(), x as u32, y as u32)])
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit rasters.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl RasterMut {
    /// Get a cell value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Get a cell value at signed coordinates.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<u32> {
        if !in_bounds(self.width(), self.height(), x.into(), y.into()) {
            return None;
        }
        Some(self.data()[index(self.width(), x as u32, y as u32)])
    }

    /// Set a cell value at (x, y).
    ///
    /// `Bit8` values are clamped to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        if x >= w || y >= h {
            return Err(Error::OutOfBounds {
                x: x.into(),
                y: y.into(),
                width: w,
                height: h,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a cell value at signed coordinates.
    ///
    /// Returns `false` (and writes nothing) when the position is outside
    /// the raster.
    pub fn set_pixel_at(&mut self, x: i32, y: i32, val: u32) -> bool {
        if !in_bounds(self.width(), self.height(), x.into(), y.into()) {
            return false;
        }
        self.set_pixel_unchecked(x as u32, y as u32, val);
        true
    }

    /// Set a cell value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the cell buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let val = match self.depth() {
            PixelDepth::Bit8 => val.min(255),
            PixelDepth::Bit32 => val,
        };
        let idx = index(self.width(), x, y);
        self.data_mut()[idx] = val;
    }

    /// Set an RGB cell at (x, y).
    ///
    /// Only valid for 32-bit rasters.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let raster = Raster::new(5, 4, PixelDepth::Bit8).unwrap();
        let mut rm = raster.try_into_mut().unwrap();
        rm.set_pixel(4, 3, 128).unwrap();
        let raster: Raster = rm.into();
        assert_eq!(raster.get_pixel(4, 3), Some(128));
        assert_eq!(raster.get_pixel(5, 3), None);
    }

    #[test]
    fn test_bit8_clamps() {
        let mut rm = Raster::new(2, 2, PixelDepth::Bit8).unwrap().to_mut();
        rm.set_pixel(0, 0, 1000).unwrap();
        assert_eq!(rm.get_pixel(0, 0), Some(255));
    }

    #[test]
    fn test_signed_access_outside() {
        let mut rm = Raster::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        assert_eq!(rm.pixel_at(-1, 0), None);
        assert_eq!(rm.pixel_at(0, 3), None);
        assert!(!rm.set_pixel_at(-4, 1, 9));
        assert!(rm.set_pixel_at(2, 2, 9));
        assert_eq!(rm.pixel_at(2, 2), Some(9));
    }

    #[test]
    fn test_set_out_of_bounds_errors() {
        let mut rm = Raster::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        assert!(rm.set_pixel(3, 0, 1).is_err());
    }

    #[test]
    fn test_rgb_access() {
        let mut rm = Raster::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        rm.set_rgb(1, 0, 10, 20, 30).unwrap();
        let raster: Raster = rm.into();
        assert_eq!(raster.get_rgb(1, 0), Some((10, 20, 30)));

        let gray = Raster::new(2, 2, PixelDepth::Bit8).unwrap();
        assert_eq!(gray.get_rgb(0, 0), None);
        assert!(gray.to_mut().set_rgb(0, 0, 1, 2, 3).is_err());
    }
}
