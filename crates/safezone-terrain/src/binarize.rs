//! Hazard / safe binarization
//!
//! Every cell of the output is either [`CellState::Hazard`] or
//! [`CellState::UnvisitedSafe`]; nothing is left unclassified.

use crate::{CellState, TerrainError, TerrainResult};
use safezone_core::{PixelDepth, Raster, color};

/// Closed range of source values classified as hazard
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPredicate {
    /// Luminance within `min..=max`
    Gray { min: u8, max: u8 },
    /// Each of red, green and blue within its `lower..=upper` channel bound
    Rgb { lower: [u8; 3], upper: [u8; 3] },
}

impl Default for HazardPredicate {
    /// Dark cells are hazards: luminance `0..=127`.
    fn default() -> Self {
        HazardPredicate::Gray { min: 0, max: 127 }
    }
}

impl HazardPredicate {
    /// Check that every range is non-empty
    pub fn validate(&self) -> TerrainResult<()> {
        let ok = match *self {
            HazardPredicate::Gray { min, max } => min <= max,
            HazardPredicate::Rgb { lower, upper } => {
                lower.iter().zip(&upper).all(|(lo, hi)| lo <= hi)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(TerrainError::InvalidConfig(format!(
                "empty hazard range {:?}",
                self
            )))
        }
    }

    /// Whether a raster cell of the given depth is a hazard
    pub fn is_hazard(&self, depth: PixelDepth, val: u32) -> bool {
        let (r, g, b) = match depth {
            PixelDepth::Bit8 => {
                let v = val.min(255) as u8;
                (v, v, v)
            }
            PixelDepth::Bit32 => color::extract_rgb(val),
        };
        match *self {
            HazardPredicate::Gray { min, max } => {
                let l = match depth {
                    PixelDepth::Bit8 => r,
                    PixelDepth::Bit32 => color::luminance(r, g, b),
                };
                (min..=max).contains(&l)
            }
            HazardPredicate::Rgb { lower, upper } => [r, g, b]
                .iter()
                .zip(lower.iter().zip(&upper))
                .all(|(&c, (&lo, &hi))| (lo..=hi).contains(&c)),
        }
    }
}

/// Classify every cell of a gray or colour raster as hazard or safe
///
/// Re-binarizing the output is a no-op only for predicates that contain 0
/// and exclude 255, such as the default `Gray { 0, 127 }`. A predicate that
/// contains 255 or excludes 0 inverts a binary raster instead.
pub fn binarize(raster: &Raster, predicate: &HazardPredicate) -> TerrainResult<Raster> {
    predicate.validate()?;

    let depth = raster.depth();
    let hazard = CellState::Hazard.value();
    let safe = CellState::UnvisitedSafe.value();
    let data: Vec<u32> = raster
        .data()
        .iter()
        .map(|&v| {
            if predicate.is_hazard(depth, v) {
                hazard
            } else {
                safe
            }
        })
        .collect();

    let out = Raster::from_vec(raster.width(), raster.height(), PixelDepth::Bit8, data)?;
    log::debug!(
        "binarized {}x{}: {} hazard cells",
        out.width(),
        out.height(),
        out.count_value(hazard)
    );
    Ok(out)
}

/// Fixed threshold on luminance: below `thresh` is 0, the rest 255
pub fn threshold_gray(raster: &Raster, thresh: u32) -> Raster {
    let mut out = raster.to_gray().to_mut();
    for v in out.data_mut() {
        *v = if *v < thresh { 0 } else { 255 };
    }
    out.into()
}

/// Invert the luminance of a raster (`255 - v`)
pub fn invert(raster: &Raster) -> Raster {
    raster.to_gray().invert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use safezone_test::{raster_from_ascii, raster_to_ascii};

    fn gray(values: &[u32]) -> Raster {
        Raster::from_vec(values.len() as u32, 1, PixelDepth::Bit8, values.to_vec()).unwrap()
    }

    #[test]
    fn test_default_predicate_bounds_inclusive() {
        let r = gray(&[0, 127, 128, 255]);
        let b = binarize(&r, &HazardPredicate::default()).unwrap();
        assert_eq!(b.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_binarize_is_idempotent() {
        let r = raster_from_ascii(&["#.#", "..#", "#.."]).unwrap();
        let p = HazardPredicate::default();
        let once = binarize(&r, &p).unwrap();
        let twice = binarize(&once, &p).unwrap();
        assert_eq!(once.data(), r.data());
        assert_eq!(twice.data(), once.data());
    }

    #[test]
    fn test_rebinarize_with_bright_predicate_inverts() {
        let r = raster_from_ascii(&["#.#", "..#"]).unwrap();
        let bright = HazardPredicate::Gray { min: 200, max: 255 };
        let once = binarize(&r, &bright).unwrap();
        assert_eq!(raster_to_ascii(&once), vec![".#.", "##."]);
        let twice = binarize(&once, &bright).unwrap();
        assert_eq!(twice.data(), r.data());
    }

    #[test]
    fn test_rgb_predicate() {
        let mut r = Raster::new(3, 1, PixelDepth::Bit32).unwrap().to_mut();
        r.set_rgb(0, 0, 200, 10, 10).unwrap();
        r.set_rgb(1, 0, 150, 0, 0).unwrap();
        r.set_rgb(2, 0, 149, 0, 0).unwrap();
        let r: Raster = r.into();

        let red = HazardPredicate::Rgb {
            lower: [150, 0, 0],
            upper: [255, 255, 255],
        };
        let b = binarize(&r, &red).unwrap();
        assert_eq!(b.depth(), PixelDepth::Bit8);
        assert_eq!(b.data(), &[0, 0, 255]);
    }

    #[test]
    fn test_gray_predicate_on_colour() {
        let mut r = Raster::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        r.set_rgb(0, 0, 10, 10, 10).unwrap();
        r.set_rgb(1, 0, 250, 250, 250).unwrap();
        let r: Raster = r.into();
        let b = binarize(&r, &HazardPredicate::default()).unwrap();
        assert_eq!(b.data(), &[0, 255]);
    }

    #[test]
    fn test_empty_range_rejected() {
        let r = gray(&[1]);
        let p = HazardPredicate::Gray { min: 10, max: 5 };
        assert!(matches!(
            binarize(&r, &p),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_threshold_and_invert() {
        let r = gray(&[0, 127, 128, 255]);
        assert_eq!(threshold_gray(&r, 128).data(), &[0, 0, 255, 255]);
        assert_eq!(invert(&r).data(), &[255, 128, 127, 0]);
    }
}
