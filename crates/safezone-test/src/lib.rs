//! safezone-test - Regression test framework for safezone
//!
//! Supports two modes, chosen with the `REGTEST_MODE` environment variable:
//!
//! - **Compare** (default): check computed results against expectations
//! - **Display**: additionally write intermediate rasters to `tests/regout`
//!
//! # Usage
//!
//! ```ignore
//! use safezone_test::{RegParams, raster_from_ascii};
//!
//! let mut rp = RegParams::new("grow");
//! let raster = raster_from_ascii(&["#..", "#.."]).unwrap();
//! rp.compare_values(4.0, raster.count_value(255) as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use safezone_core::{PixelDepth, Raster};

/// Cell value used for `#` in ASCII fixtures
pub const ASCII_HAZARD: u32 = 0;
/// Cell value used for `.` in ASCII fixtures
pub const ASCII_SAFE: u32 = 255;

/// Build an 8-bpp raster from rows of ASCII art
///
/// `#` is a hazard cell (0), `.` a safe cell (255) and `o` a visited safe
/// cell (128). All rows must have the same length.
pub fn raster_from_ascii(rows: &[&str]) -> TestResult<Raster> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for (y, row) in rows.iter().enumerate() {
        if row.len() as u32 != width {
            return Err(TestError::Fixture(format!(
                "row {} has length {}, expected {}",
                y,
                row.len(),
                width
            )));
        }
        for c in row.chars() {
            data.push(match c {
                '#' => ASCII_HAZARD,
                '.' => ASCII_SAFE,
                'o' => 128,
                other => {
                    return Err(TestError::Fixture(format!(
                        "unexpected character {:?} in row {}",
                        other, y
                    )));
                }
            });
        }
    }

    Ok(Raster::from_vec(width, height, PixelDepth::Bit8, data)?)
}

/// Render an 8-bpp raster back to ASCII art, the inverse of
/// [`raster_from_ascii`]. Values other than 0 and 128 print as `.`.
pub fn raster_to_ascii(raster: &Raster) -> Vec<String> {
    (0..raster.height())
        .map(|y| {
            raster
                .row_data(y)
                .iter()
                .map(|&v| match v {
                    0 => '#',
                    128 => 'o',
                    _ => '.',
                })
                .collect()
        })
        .collect()
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // safezone-test is at crates/safezone-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_fixture() {
        let r = raster_from_ascii(&["#.o", "..#"]).unwrap();
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.get_pixel(0, 0), Some(0));
        assert_eq!(r.get_pixel(1, 0), Some(255));
        assert_eq!(r.get_pixel(2, 0), Some(128));
        assert_eq!(r.get_pixel(2, 1), Some(0));
        assert_eq!(raster_to_ascii(&r), vec!["#.o", "..#"]);
    }

    #[test]
    fn test_ragged_fixture_rejected() {
        assert!(matches!(
            raster_from_ascii(&["##", "#"]),
            Err(TestError::Fixture(_))
        ));
    }

    #[test]
    fn test_bad_character_rejected() {
        assert!(raster_from_ascii(&["#x"]).is_err());
    }

    #[test]
    fn test_empty_fixture_rejected() {
        assert!(matches!(raster_from_ascii(&[]), Err(TestError::Core(_))));
    }
}
