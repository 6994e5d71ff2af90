//! End-to-end terrain classification
//!
//! ```text
//! source ─► binarize ─► [smooth] ─► hazard blobs ─► link ─► grow ─► safe zones
//!                                                                 │
//!                                         report ◄────────────────┤
//!                                       annotate ◄────────────────┘ ─► [overlay]
//! ```
//!
//! In [`PipelineMode::AreaThreshold`] the blob and link stages are skipped
//! and the binarized raster goes straight to region growing.

use crate::binarize::{HazardPredicate, binarize};
use crate::detect::{detect_hazard_blobs, detect_safe_zones};
use crate::grow::{GrowthReport, grow_regions};
use crate::link::{HazardLinker, LinkSegment};
use crate::report::AreaReport;
use crate::smooth::smooth;
use crate::{CellState, SafeZoneConfig, SmoothingConfig, TerrainResult};
use safezone_core::{Color, ImageFormat, Raster, blend_weighted};
use safezone_region::Blob;
use std::path::{Path, PathBuf};

/// Weight of the annotated raster in an overlay
pub const OVERLAY_WEIGHT_ANNOTATED: f32 = 0.7;
/// Weight of the source image in an overlay
pub const OVERLAY_WEIGHT_SOURCE: f32 = 0.9;

/// Which stages run between binarization and region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// Extract hazard blobs and link them before growing
    #[default]
    Linked,
    /// Grow regions directly on the binarized raster
    AreaThreshold,
}

/// Per-run switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Write the intermediate rasters next to the output
    pub debug: bool,
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineConfig {
    /// Linking, growing and detection parameters
    pub zone: SafeZoneConfig,
    /// Hazard classification rule
    pub predicate: HazardPredicate,
    /// Stage selection
    pub mode: PipelineMode,
    /// Erosion of the safe area after binarization, if any
    pub smoothing: Option<SmoothingConfig>,
    /// Blend the annotated result over the source image
    pub overlay: bool,
}

impl PipelineConfig {
    /// Check every part of the configuration
    pub fn validate(&self) -> TerrainResult<()> {
        self.zone.validate()?;
        self.predicate.validate()?;
        if let Some(smoothing) = &self.smoothing {
            smoothing.validate()?;
        }
        Ok(())
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Binarized (and smoothed) raster
    pub binary: Raster,
    /// Hazard blobs found in `binary`
    pub hazard_blobs: Vec<Blob>,
    /// Raster after linking
    pub linked: Raster,
    /// Strokes drawn by the linker
    pub segments: Vec<LinkSegment>,
    /// Raster after region growing: hazard and visited safe cells only
    pub cleaned: Raster,
    /// Region areas from growing
    pub growth: GrowthReport,
    /// Candidate safe zones in `cleaned`
    pub safe_zones: Vec<Blob>,
    /// Usable-area summary
    pub report: AreaReport,
    /// RGB rendering of `cleaned` with safe zones circled, overlaid on the
    /// source if requested
    pub annotated: Raster,
}

/// Draw each safe zone as a red circle of its equivalent diameter on an RGB
/// copy of `cleaned`
pub fn annotate(cleaned: &Raster, zones: &[Blob]) -> Raster {
    let mut rgb = cleaned.to_rgb().to_mut();
    for zone in zones {
        let radius = (zone.diameter() / 2.0).round().max(1.0) as u32;
        rgb.render_circle_color(zone.centroid.to_pixel(), radius, 1, Color::RED);
    }
    rgb.into()
}

/// Blend an annotated raster over the source image
pub fn overlay(annotated: &Raster, source: &Raster) -> TerrainResult<Raster> {
    Ok(blend_weighted(
        &annotated.to_rgb(),
        OVERLAY_WEIGHT_ANNOTATED,
        &source.to_rgb(),
        OVERLAY_WEIGHT_SOURCE,
        0.0,
    )?)
}

/// Path for a side output: `<dir of output>/<stem><suffix>.png`
pub fn side_output_path(output: &Path, stem: &str, suffix: &str) -> PathBuf {
    let name = format!("{}{}.{}", stem, suffix, ImageFormat::Png.extension());
    match output.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Configured terrain classification pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline
    ///
    /// # Errors
    ///
    /// Returns [`crate::TerrainError::InvalidConfig`] if any part of the
    /// configuration is out of range. Nothing is processed in that case.
    pub fn new(config: PipelineConfig) -> TerrainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Classify a source raster
    pub fn run(&self, source: &Raster, options: RunOptions) -> TerrainResult<PipelineOutput> {
        let config = &self.config;

        let mut binary = binarize(source, &config.predicate)?;
        if let Some(smoothing) = &config.smoothing {
            binary = smooth(&binary, smoothing)?;
        }
        if binary.count_value(CellState::Hazard.value()) == binary.area() {
            log::warn!("no safe cells after binarization");
        }

        let (hazard_blobs, linked, segments) = match config.mode {
            PipelineMode::Linked => {
                let blobs = detect_hazard_blobs(&binary)?;
                let out = HazardLinker::new(config.zone.clone())?.link(&binary, &blobs)?;
                (blobs, out.raster, out.segments)
            }
            PipelineMode::AreaThreshold => (Vec::new(), binary.clone(), Vec::new()),
        };

        let (cleaned, growth) = grow_regions(&linked, config.zone.range)?;
        let safe_zones = detect_safe_zones(&cleaned, &config.zone)?;
        let report = AreaReport::from_growth(&growth);

        let mut annotated = annotate(&cleaned, &safe_zones);
        if config.overlay {
            annotated = overlay(&annotated, source)?;
        }

        if options.debug {
            log::debug!(
                "{:?} run: {} hazard blobs, {} strokes, {} safe zones, {}",
                config.mode,
                hazard_blobs.len(),
                segments.len(),
                safe_zones.len(),
                report
            );
        }

        Ok(PipelineOutput {
            binary,
            hazard_blobs,
            linked,
            segments,
            cleaned,
            growth,
            safe_zones,
            report,
            annotated,
        })
    }

    /// Read `input`, classify it and write the annotated result to `output`
    ///
    /// With `options.debug`, the binarized, linked and cleaned rasters are
    /// also written next to `output` as `<stem>_bin.png`, `<stem>_seg.png`
    /// and `<stem>_clean.png`, where `<stem>` is the input's file stem.
    pub fn run_file(
        &self,
        input: &Path,
        output: &Path,
        options: RunOptions,
    ) -> TerrainResult<PipelineOutput> {
        let source = safezone_io::read_image(input)?;
        let result = self.run(&source, options)?;

        safezone_io::write_image(&result.annotated, output, ImageFormat::Unknown)?;
        log::info!("wrote {}", output.display());

        if options.debug {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("terrain");
            for (suffix, raster) in [
                ("_bin", &result.binary),
                ("_seg", &result.linked),
                ("_clean", &result.cleaned),
            ] {
                let path = side_output_path(output, stem, suffix);
                safezone_io::write_image(raster, &path, ImageFormat::Png)?;
                log::debug!("wrote {}", path.display());
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safezone_core::{PixelDepth, color};
    use safezone_test::raster_from_ascii;

    #[test]
    fn test_all_safe_field() {
        let source = Raster::new_filled(20, 20, PixelDepth::Bit8, 255).unwrap();
        let config = PipelineConfig {
            zone: SafeZoneConfig::default().with_range(5),
            ..Default::default()
        };
        let out = Pipeline::new(config)
            .unwrap()
            .run(&source, RunOptions::default())
            .unwrap();

        assert!(out.hazard_blobs.is_empty());
        assert!(out.segments.is_empty());
        assert_eq!(out.report.to_string(), "usable area: 100.00%");
        assert_eq!(out.safe_zones.len(), 1);
        assert_eq!(out.safe_zones[0].area, 400.0);
        assert_eq!(out.annotated.depth(), PixelDepth::Bit32);
    }

    #[test]
    fn test_all_hazard_field() {
        let source = Raster::new(8, 8, PixelDepth::Bit8).unwrap();
        let out = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&source, RunOptions::default())
            .unwrap();
        assert_eq!(out.hazard_blobs.len(), 1);
        assert!(out.safe_zones.is_empty());
        assert_eq!(out.report.percentage(), 0.0);
    }

    #[test]
    fn test_area_threshold_mode_skips_linking() {
        let mut rows = vec![".........."; 10];
        rows[2] = "..#.......";
        rows[6] = "..#.......";
        let source = raster_from_ascii(&rows).unwrap();
        let config = PipelineConfig {
            mode: PipelineMode::AreaThreshold,
            ..Default::default()
        };
        let out = Pipeline::new(config)
            .unwrap()
            .run(&source, RunOptions::default())
            .unwrap();
        assert!(out.hazard_blobs.is_empty());
        assert_eq!(out.linked.data(), out.binary.data());
        assert_eq!(out.growth.usable_pixels, 98);
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = PipelineConfig {
            smoothing: Some(SmoothingConfig::default().with_kernel_size(0)),
            ..Default::default()
        };
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_annotate_draws_red() {
        let cleaned = Raster::new_filled(20, 20, PixelDepth::Bit8, 128).unwrap();
        let zones = detect_safe_zones(&cleaned, &SafeZoneConfig::default()).unwrap();
        let annotated = annotate(&cleaned, &zones);
        let red = annotated
            .data()
            .iter()
            .filter(|&&p| color::extract_rgb(p) == (255, 0, 0))
            .count();
        assert!(red > 0);
    }

    #[test]
    fn test_overlay_blends() {
        let a = Raster::new_filled(2, 2, PixelDepth::Bit8, 100).unwrap();
        let b = Raster::new_filled(2, 2, PixelDepth::Bit8, 100).unwrap();
        let o = overlay(&a, &b).unwrap();
        assert_eq!(o.get_rgb(0, 0), Some((160, 160, 160)));
    }

    #[test]
    fn test_side_output_path() {
        let p = side_output_path(Path::new("out/terrain_out.png"), "terrain", "_bin");
        assert_eq!(p, PathBuf::from("out/terrain_bin.png"));
    }
}
