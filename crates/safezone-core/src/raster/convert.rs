//! Depth conversion between gray and colour rasters

use super::{PixelDepth, Raster, RasterData};
use crate::color;
use std::sync::Arc;

impl Raster {
    /// Convert to an 8-bit luminance raster.
    ///
    /// 8-bit rasters are returned as a shared clone. 32-bit cells are
    /// reduced with the integer weights 299/587/114.
    pub fn to_gray(&self) -> Raster {
        if self.depth() == PixelDepth::Bit8 {
            return self.clone();
        }
        let data = self
            .data()
            .iter()
            .map(|&p| {
                let (r, g, b) = color::extract_rgb(p);
                u32::from(color::luminance(r, g, b))
            })
            .collect();
        self.rebuild(PixelDepth::Bit8, data)
    }

    /// Convert to a 32-bit RGB raster.
    ///
    /// 8-bit cells are replicated into all three channels.
    pub fn to_rgb(&self) -> Raster {
        if self.depth() == PixelDepth::Bit32 {
            return self.clone();
        }
        let data = self
            .data()
            .iter()
            .map(|&v| {
                let g = v.min(255) as u8;
                color::compose_rgb(g, g, g)
            })
            .collect();
        self.rebuild(PixelDepth::Bit32, data)
    }

    /// Invert an 8-bit raster (`255 - v`); 32-bit rasters invert each channel.
    pub fn invert(&self) -> Raster {
        let data = match self.depth() {
            PixelDepth::Bit8 => self.data().iter().map(|&v| 255 - v.min(255)).collect(),
            PixelDepth::Bit32 => self
                .data()
                .iter()
                .map(|&p| {
                    let (r, g, b) = color::extract_rgb(p);
                    color::compose_rgb(255 - r, 255 - g, 255 - b)
                })
                .collect(),
        };
        self.rebuild(self.depth(), data)
    }

    fn rebuild(&self, depth: PixelDepth, data: Vec<u32>) -> Raster {
        let spp = match depth {
            PixelDepth::Bit8 => 1,
            PixelDepth::Bit32 => 3,
        };
        Raster {
            inner: Arc::new(RasterData {
                width: self.width(),
                height: self.height(),
                depth,
                spp,
                informat: self.informat(),
                data,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_rgb_roundtrip() {
        let gray = Raster::new_filled(3, 2, PixelDepth::Bit8, 77).unwrap();
        let rgb = gray.to_rgb();
        assert_eq!(rgb.depth(), PixelDepth::Bit32);
        assert_eq!(rgb.get_rgb(2, 1), Some((77, 77, 77)));
        let back = rgb.to_gray();
        assert_eq!(back.get_pixel(2, 1), Some(77));
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let mut rm = Raster::new(4, 1, PixelDepth::Bit8).unwrap().to_mut();
        for x in 0..4 {
            rm.set_pixel(x, 0, x * 60).unwrap();
        }
        let r: Raster = rm.into();
        assert_eq!(r.invert().get_pixel(0, 0), Some(255));
        assert_eq!(r.invert().invert().data(), r.data());
    }
}
