//! Hazard linking
//!
//! Closes gaps between nearby hazard regions so that a later flood fill
//! cannot leak through an opening narrower than `range`. Each hazard blob
//! is linked in two ways:
//!
//! 1. **Pairwise**: a stroke to every other blob whose centroid (or, in
//!    [`LinkMode::Border`], whose facing border) is close enough.
//! 2. **Rays**: along each cardinal direction, step out of the blob to the
//!    first safe cell, then look a bounded distance further for hazard.
//!    A hit is bridged with a stroke that overshoots both ends by
//!    [`RAY_INSET`] cells.
//!
//! Rays and border walks read the input raster only; strokes go to a
//! working copy, so the result does not depend on blob order.

use crate::cell::require_gray;
use crate::{CellState, LinkMode, LinkStrategy, SafeZoneConfig, TerrainResult};
use safezone_core::{PixelOp, Point, Raster, generate_line_points};
use safezone_region::Blob;

/// Cells a ray stroke extends past each end of the gap
pub const RAY_INSET: i32 = 4;

/// Cardinal ray direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in casting order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)`; `y` grows downwards
    pub const fn step(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }
}

/// Why a stroke was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Two blobs close to each other
    Pairwise,
    /// A cardinal ray found hazard across a gap
    Ray(Direction),
}

/// A stroke drawn by the linker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSegment {
    pub from: Point,
    pub to: Point,
    pub kind: LinkKind,
}

/// Result of linking
#[derive(Debug, Clone)]
pub struct LinkOutput {
    /// Input raster with every stroke drawn as hazard
    pub raster: Raster,
    /// Strokes in drawing order
    pub segments: Vec<LinkSegment>,
}

fn is_hazard(raster: &Raster, p: Point) -> Option<bool> {
    raster
        .pixel_at(p.x, p.y)
        .map(|v| !CellState::is_safe_value(v))
}

/// Cast a ray from `origin` across the first safe gap
///
/// Steps from `origin` in `dir` until the first safe cell `i`, then checks
/// at most `scan_len` further cells for a hazard cell `j`.
///
/// # Returns
///
/// `Some((i, j))` if a hazard cell closes the gap, `None` if the ray leaves
/// the raster or the scan runs out first.
pub fn cast_ray(
    raster: &Raster,
    origin: Point,
    dir: Direction,
    scan_len: u32,
) -> Option<(Point, Point)> {
    let step = dir.step();

    let mut gap_start = origin + step;
    while is_hazard(raster, gap_start)? {
        gap_start = gap_start + step;
    }

    let mut p = gap_start;
    for _ in 0..scan_len {
        p = p + step;
        if is_hazard(raster, p)? {
            return Some((gap_start, p));
        }
    }
    None
}

/// Walk from `from` towards `to` and return the last hazard cell before
/// the first safe one
///
/// Returns `from` itself if it is not a hazard cell.
pub fn find_border(raster: &Raster, from: Point, to: Point) -> Point {
    let mut border = from;
    for p in generate_line_points(from, to) {
        if is_hazard(raster, p) != Some(true) {
            break;
        }
        border = p;
    }
    border
}

/// Links hazard blobs in a binarized raster
#[derive(Debug, Clone)]
pub struct HazardLinker {
    config: SafeZoneConfig,
}

impl HazardLinker {
    /// Create a linker
    ///
    /// # Errors
    ///
    /// Returns [`crate::TerrainError::InvalidConfig`] if the configuration
    /// does not validate (e.g. a zero range).
    pub fn new(config: SafeZoneConfig) -> TerrainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &SafeZoneConfig {
        &self.config
    }

    fn pair_linked(&self, raster: &Raster, p1: Point, p2: Point) -> bool {
        let d = p1.distance(p2);
        if d <= 0.0 {
            return false;
        }
        let range = f64::from(self.config.range);
        match self.config.link_mode {
            LinkMode::Centroid => d < range,
            LinkMode::Border => {
                let b1 = find_border(raster, p1, p2);
                let b2 = find_border(raster, p2, p1);
                b1.distance(b2) < 2.0 * range
            }
        }
    }

    /// Link every blob in `blobs`
    ///
    /// With no blobs the input is returned as a shared clone.
    pub fn link(&self, raster: &Raster, blobs: &[Blob]) -> TerrainResult<LinkOutput> {
        require_gray(raster)?;

        if blobs.is_empty() {
            log::debug!("no hazard blobs to link");
            return Ok(LinkOutput {
                raster: raster.clone(),
                segments: Vec::new(),
            });
        }

        let hazard = PixelOp::Set(CellState::Hazard.value());
        let width = self.config.stroke_width;
        let scan_len = self.config.ray_scan_len();
        let centers: Vec<Point> = blobs.iter().map(|b| b.centroid.to_pixel()).collect();

        let mut working = raster.to_mut();
        let mut segments = Vec::new();

        for (i, &p1) in centers.iter().enumerate() {
            for &p2 in &centers[i + 1..] {
                if self.pair_linked(raster, p1, p2) {
                    working.render_line(p1, p2, width, hazard);
                    log::trace!("pairwise link {:?} -> {:?}", p1, p2);
                    segments.push(LinkSegment {
                        from: p1,
                        to: p2,
                        kind: LinkKind::Pairwise,
                    });
                }
            }

            for dir in Direction::ALL {
                let Some((gap_start, gap_end)) = cast_ray(raster, p1, dir, scan_len) else {
                    continue;
                };
                let step = dir.step();
                let from = gap_start - step * RAY_INSET;
                let to = gap_end + step * RAY_INSET;
                working.render_line(from, to, width, hazard);
                log::trace!("{:?} ray link {:?} -> {:?}", dir, from, to);
                segments.push(LinkSegment {
                    from,
                    to,
                    kind: LinkKind::Ray(dir),
                });
                if self.config.link_strategy == LinkStrategy::FirstSuccess {
                    break;
                }
            }
        }

        log::debug!(
            "linked {} hazard blobs with {} strokes",
            blobs.len(),
            segments.len()
        );
        Ok(LinkOutput {
            raster: working.into(),
            segments,
        })
    }
}

/// Link hazard blobs with the given configuration
pub fn link_hazards(
    raster: &Raster,
    blobs: &[Blob],
    config: &SafeZoneConfig,
) -> TerrainResult<LinkOutput> {
    HazardLinker::new(config.clone())?.link(raster, blobs)
}
