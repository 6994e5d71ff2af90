//! Weighted blending of two rasters
//!
//! Used to superimpose an annotated classification over the source image.

use super::{PixelDepth, Raster};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn mix(a: u8, wa: f32, b: u8, wb: f32, gamma: f32) -> u8 {
    (a as f32 * wa + b as f32 * wb + gamma).round().clamp(0.0, 255.0) as u8
}

/// Compute `dst = a * wa + b * wb + gamma`, saturating each channel.
///
/// Both rasters must have the same size and depth.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if sizes differ and
/// [`Error::InvalidParameter`] if depths differ.
pub fn blend_weighted(a: &Raster, wa: f32, b: &Raster, wb: f32, gamma: f32) -> Result<Raster> {
    if !a.sizes_equal(b) {
        return Err(Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        });
    }
    if a.depth() != b.depth() {
        return Err(Error::InvalidParameter(format!(
            "cannot blend {} bpp with {} bpp",
            a.depth().bits(),
            b.depth().bits()
        )));
    }

    let mut out = a.create_template().to_mut();
    let dst = out.data_mut();
    for (i, (&pa, &pb)) in a.data().iter().zip(b.data()).enumerate() {
        dst[i] = match a.depth() {
            PixelDepth::Bit8 => u32::from(mix(pa as u8, wa, pb as u8, wb, gamma)),
            PixelDepth::Bit32 => {
                let (ra, ga, ba) = color::extract_rgb(pa);
                let (rb, gb, bb) = color::extract_rgb(pb);
                color::compose_rgb(
                    mix(ra, wa, rb, wb, gamma),
                    mix(ga, wa, gb, wb, gamma),
                    mix(ba, wa, bb, wb, gamma),
                )
            }
        };
    }

    Ok(out.into())
}
