//! Cell classification states

use crate::TerrainResult;
use safezone_core::{PixelDepth, Raster};

/// Classification of one terrain cell
///
/// The discriminants are the 8-bpp values stored in working rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// Not traversable
    Hazard = 0,
    /// Safe and already claimed by a region
    VisitedSafe = 128,
    /// Safe and not yet claimed by a region
    UnvisitedSafe = 255,
}

impl CellState {
    /// Raster value for this state
    #[inline]
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// State held by a raster value, if it is one of the three
    pub fn from_value(val: u32) -> Option<Self> {
        match val {
            0 => Some(CellState::Hazard),
            128 => Some(CellState::VisitedSafe),
            255 => Some(CellState::UnvisitedSafe),
            _ => None,
        }
    }

    /// Whether a raster value counts as safe (anything but hazard)
    #[inline]
    pub fn is_safe_value(val: u32) -> bool {
        val != CellState::Hazard.value()
    }
}

/// Require a one-channel classification raster
pub(crate) fn require_gray(raster: &Raster) -> TerrainResult<()> {
    if raster.depth() != PixelDepth::Bit8 {
        return Err(safezone_core::Error::UnsupportedDepth(raster.depth().bits()).into());
    }
    Ok(())
}
