//! Binary morphological operations
//!
//! Operates on 8-bpp rasters where any non-zero cell is foreground and zero
//! is background. Output cells are 255 (foreground) or 0.

use crate::{Kernel, MorphError, MorphResult};
use safezone_core::{PixelDepth, Raster};

const FOREGROUND: u32 = 255;

fn check_gray(raster: &Raster) -> MorphResult<()> {
    if raster.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8-bpp",
            actual: raster.depth().bits(),
        });
    }
    Ok(())
}

/// Erode the foreground of a binary raster
///
/// A cell stays foreground only if every hit of the kernel, centred on it,
/// lands on foreground. Cells outside the raster count as foreground, so
/// erosion never eats in from the image border.
pub fn erode(raster: &Raster, kernel: &Kernel) -> MorphResult<Raster> {
    check_gray(raster)?;

    let w = raster.width();
    let h = raster.height();
    let offsets: Vec<_> = kernel.hit_offsets().collect();
    let mut out = raster.create_template().to_mut();

    for y in 0..h {
        for x in 0..w {
            let keep = offsets.iter().all(|&(dx, dy)| {
                raster
                    .pixel_at(x as i32 + dx, y as i32 + dy)
                    .is_none_or(|v| v != 0)
            });
            if keep {
                out.set_pixel_unchecked(x, y, FOREGROUND);
            }
        }
    }

    Ok(out.into())
}

/// Dilate the foreground of a binary raster
///
/// A cell becomes foreground if any hit of the kernel, centred on it, lands
/// on foreground. Cells outside the raster count as background.
pub fn dilate(raster: &Raster, kernel: &Kernel) -> MorphResult<Raster> {
    check_gray(raster)?;

    let w = raster.width();
    let h = raster.height();
    let offsets: Vec<_> = kernel.hit_offsets().collect();
    let mut out = raster.create_template().to_mut();

    for y in 0..h {
        for x in 0..w {
            let hit = offsets.iter().any(|&(dx, dy)| {
                raster
                    .pixel_at(x as i32 + dx, y as i32 + dy)
                    .is_some_and(|v| v != 0)
            });
            if hit {
                out.set_pixel_unchecked(x, y, FOREGROUND);
            }
        }
    }

    Ok(out.into())
}

/// Erode `count` times in succession
///
/// A `count` of zero returns the input unchanged.
pub fn erode_n(raster: &Raster, kernel: &Kernel, count: u32) -> MorphResult<Raster> {
    check_gray(raster)?;

    let mut current = raster.clone();
    for _ in 0..count {
        current = erode(&current, kernel)?;
    }
    log::debug!(
        "eroded {}x{} raster {} times with {}x{} {:?} kernel",
        raster.width(),
        raster.height(),
        count,
        kernel.size(),
        kernel.size(),
        kernel.kernel_type()
    );
    Ok(current)
}
