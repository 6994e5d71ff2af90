//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use safezone_core::{ImageFormat, Raster};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed results with expected ones (default)
    #[default]
    Compare,
    /// Also write intermediate rasters to `tests/regout` for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, a running comparison index, the mode and every
/// failure seen so far. Comparisons never panic; call [`RegParams::cleanup`]
/// at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "terrain")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!("=== {}_reg ({:?}) ===", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Number of checks made so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether rasters are written out
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "{}_reg #{}: expected {}, got {} (|diff| {} > {})",
                self.test_name, self.index, expected, actual, diff, delta
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality of size, depth and cells
    pub fn compare_raster(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if !expected.sizes_equal(actual) || expected.depth() != actual.depth() {
            self.fail(format!(
                "{}_reg #{}: raster is {}x{}, expected {}x{}",
                self.test_name,
                self.index,
                actual.width(),
                actual.height(),
                expected.width(),
                expected.height()
            ));
            return false;
        }

        let w = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            self.fail(format!(
                "{}_reg #{}: first differing cell at ({}, {})",
                self.test_name,
                self.index,
                i % w,
                i / w
            ));
            return false;
        }

        true
    }

    /// Write a raster to `tests/regout` in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `<test>.<index>.png` after the index is advanced.
    pub fn write_raster(&mut self, raster: &Raster) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ImageFormat::Png.extension()
        );
        safezone_io::write_image(raster, &path, ImageFormat::Png).map_err(|e| {
            TestError::RasterWrite {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Print a summary and consume the parameters
    ///
    /// Returns whether every comparison passed.
    pub fn cleanup(self) -> bool {
        let verdict = if self.success { "ok" } else { "FAILED" };
        eprintln!(
            "=== {}_reg: {} ({} checks, {} failed) ===",
            self.test_name,
            verdict,
            self.index,
            self.failures.len()
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        self.success
    }

    /// Whether every comparison so far passed
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Failure messages in order
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
