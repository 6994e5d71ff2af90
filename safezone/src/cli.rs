//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use safezone::morph::KernelType;
use safezone::terrain::{
    DEFAULT_RANGE, DEFAULT_STROKE_WIDTH, HazardPredicate, LinkMode, LinkStrategy,
    PipelineConfig, PipelineMode, RunOptions, SafeZoneConfig, SmoothingConfig,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "safezone")]
#[command(version, about = "Find safe landing zones in a terrain image", long_about = None)]
pub struct Cli {
    /// Input image (PNG, JPEG or PNM)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output image [default: <input stem>_out.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Smoothing kernel size, enables smoothing
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub kernel_size: Option<u32>,

    /// Smoothing kernel shape, enables smoothing
    #[arg(short = 't', long, value_enum)]
    pub kernel_type: Option<KernelShape>,

    /// Number of erosions, enables smoothing
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub erosion_count: Option<u32>,

    /// Link distance and minimum region area, in pixels
    #[arg(short, long, default_value_t = DEFAULT_RANGE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub range: u32,

    /// Width of linking strokes, in pixels
    #[arg(long, default_value_t = DEFAULT_STROKE_WIDTH,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub stroke_width: u32,

    /// Stages to run before region growing
    #[arg(long, value_enum, default_value_t = Mode::Linked)]
    pub mode: Mode,

    /// Pairwise link rule
    #[arg(long, value_enum, default_value_t = LinkRule::Centroid)]
    pub link_mode: LinkRule,

    /// Ray casting rule
    #[arg(long, value_enum, default_value_t = RayRule::All)]
    pub link_strategy: RayRule,

    /// Minimum safe-zone convexity (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0)]
    pub min_convexity: f64,

    /// Lowest luminance classified as hazard
    #[arg(long, default_value_t = 0)]
    pub hazard_min: u8,

    /// Highest luminance classified as hazard
    #[arg(long, default_value_t = 127)]
    pub hazard_max: u8,

    /// Per-channel hazard bounds as R,G,B:R,G,B, replacing the luminance range
    #[arg(long, value_name = "LOWER:UPPER", value_parser = parse_rgb_range,
          conflicts_with_all = ["hazard_min", "hazard_max"])]
    pub hazard_rgb: Option<RgbRange>,

    /// Blend the result over the input image
    #[arg(long)]
    pub overlay: bool,

    /// Write intermediate rasters next to the output
    #[arg(short, long)]
    pub debug: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help (same as --help)
    #[arg(short = 'u', action = ArgAction::Help)]
    pub usage: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KernelShape {
    Rect,
    Cross,
    Ellipse,
}

impl From<KernelShape> for KernelType {
    fn from(shape: KernelShape) -> Self {
        match shape {
            KernelShape::Rect => KernelType::Rect,
            KernelShape::Cross => KernelType::Cross,
            KernelShape::Ellipse => KernelType::Ellipse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Linked,
    AreaThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkRule {
    Centroid,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RayRule {
    All,
    First,
}

/// Inclusive per-channel colour bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got '{}'", s));
    };
    let channel = |c: &str| {
        c.parse::<u8>()
            .map_err(|_| format!("channel '{}' is not in 0..=255", c))
    };
    Ok([channel(r)?, channel(g)?, channel(b)?])
}

/// Parse `R,G,B:R,G,B` into lower and upper bounds
pub fn parse_rgb_range(s: &str) -> Result<RgbRange, String> {
    let (lower, upper) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LOWER:UPPER, got '{}'", s))?;
    Ok(RgbRange {
        lower: parse_rgb(lower)?,
        upper: parse_rgb(upper)?,
    })
}

impl Cli {
    /// Smoothing settings, if any smoothing flag was given
    pub fn smoothing(&self) -> Option<SmoothingConfig> {
        if self.kernel_size.is_none() && self.kernel_type.is_none() && self.erosion_count.is_none()
        {
            return None;
        }
        let mut smoothing = SmoothingConfig::default();
        if let Some(size) = self.kernel_size {
            smoothing = smoothing.with_kernel_size(size);
        }
        if let Some(shape) = self.kernel_type {
            smoothing = smoothing.with_kernel_type(shape.into());
        }
        if let Some(count) = self.erosion_count {
            smoothing = smoothing.with_erosion_count(count);
        }
        Some(smoothing)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let zone = SafeZoneConfig::default()
            .with_range(self.range)
            .with_stroke_width(self.stroke_width)
            .with_min_convexity(self.min_convexity)
            .with_link_mode(match self.link_mode {
                LinkRule::Centroid => LinkMode::Centroid,
                LinkRule::Border => LinkMode::Border,
            })
            .with_link_strategy(match self.link_strategy {
                RayRule::All => LinkStrategy::AllDirections,
                RayRule::First => LinkStrategy::FirstSuccess,
            });

        PipelineConfig {
            zone,
            predicate: match self.hazard_rgb {
                Some(RgbRange { lower, upper }) => HazardPredicate::Rgb { lower, upper },
                None => HazardPredicate::Gray {
                    min: self.hazard_min,
                    max: self.hazard_max,
                },
            },
            mode: match self.mode {
                Mode::Linked => PipelineMode::Linked,
                Mode::AreaThreshold => PipelineMode::AreaThreshold,
            },
            smoothing: self.smoothing(),
            overlay: self.overlay,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions { debug: self.debug }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `<dir>/<stem>_out.png` for an input `<dir>/<stem>.<ext>`
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "terrain".to_string());
    input.with_file_name(format!("{}_out.png", stem))
}
