//! Morphological smoothing of a binarized raster
//!
//! Erodes the safe area, which widens every hazard by the kernel's reach.
//! Cells beyond the raster edge count as safe, so the border itself never
//! becomes hazard.

use crate::{SmoothingConfig, TerrainResult};
use safezone_core::Raster;
use safezone_morph::{Kernel, erode_n};

/// Erode the safe area `erosion_count` times
pub fn smooth(binary: &Raster, config: &SmoothingConfig) -> TerrainResult<Raster> {
    config.validate()?;
    let kernel = Kernel::new(config.kernel_size, config.kernel_type)?;
    Ok(erode_n(binary, &kernel, config.erosion_count)?)
}
