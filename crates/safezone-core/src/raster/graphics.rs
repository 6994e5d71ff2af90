//! Graphics rendering functions
//!
//! This module provides functions for drawing onto rasters:
//! - Lines (straight, with variable width)
//! - Circle outlines (keypoint markers)
//!
//! Every rendering call clips to the raster, so strokes that start or end
//! outside the grid are legal and simply lose their off-raster part.

use super::{PixelDepth, RasterMut};
use crate::point::Point;

/// Pixel operation for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOp {
    /// Set pixels to the given value
    Set(u32),
    /// Clear pixels to zero
    Clear,
}

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Safe-zone marker colour
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        crate::color::compose_rgb(self.r, self.g, self.b)
    }
}

// =============================================================================
// Point generation helpers
// =============================================================================

/// Generate the points of a line using Bresenham's integer algorithm.
///
/// The line connects `p1` to `p2` with 8-connectivity and includes both
/// endpoints.
pub fn generate_line_points(p1: Point, p2: Point) -> Vec<Point> {
    if p1 == p2 {
        return vec![p1];
    }

    let dx = (p2.x - p1.x).abs();
    let dy = (p2.y - p1.y).abs();
    let sx = if p2.x > p1.x { 1i32 } else { -1 };
    let sy = if p2.y > p1.y { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut pts = Vec::with_capacity(npts as usize);

    let mut x = p1.x;
    let mut y = p1.y;

    if dx >= dy {
        // Step along x (more horizontal)
        let mut err = dx / 2;
        for _ in 0..npts {
            pts.push(Point::new(x, y));
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        // Step along y (more vertical)
        let mut err = dy / 2;
        for _ in 0..npts {
            pts.push(Point::new(x, y));
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    pts
}

/// Generate the points of a line with the specified width.
///
/// For width > 1, parallel lines are added alternately on either side of
/// the base line, offset perpendicular to its dominant axis. A width of 2
/// or more makes diagonal strokes 4-connected.
pub fn generate_wide_line_points(p1: Point, p2: Point, width: u32) -> Vec<Point> {
    let width = width.max(1);
    let mut result = generate_line_points(p1, p2);
    if width == 1 {
        return result;
    }

    let is_horizontal = (p2.x - p1.x).abs() > (p2.y - p1.y).abs();

    for i in 1..width {
        let offset = (i + 1).div_ceil(2) as i32;
        let sign = if i % 2 == 1 { -1 } else { 1 };
        let shift = if is_horizontal {
            Point::new(0, offset * sign)
        } else {
            Point::new(offset * sign, 0)
        };
        result.extend(generate_line_points(p1 + shift, p2 + shift));
    }

    result
}

/// Generate the outline of a circle using the midpoint algorithm.
pub fn generate_circle_points(center: Point, radius: u32) -> Vec<Point> {
    let r = radius as i32;
    if r == 0 {
        return vec![center];
    }

    let mut pts = Vec::with_capacity(8 * r as usize);
    let mut x = r;
    let mut y = 0;
    let mut err = 1 - r;

    while x >= y {
        for (ox, oy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            pts.push(Point::new(center.x + ox, center.y + oy));
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    pts
}

// =============================================================================
// RasterMut rendering implementations
// =============================================================================

impl RasterMut {
    /// Render a set of points using the specified operation.
    ///
    /// Points outside the raster are clipped. Returns the number of
    /// in-bounds writes.
    pub fn render_points(&mut self, pts: &[Point], op: PixelOp) -> usize {
        let val = match op {
            PixelOp::Set(v) => v,
            PixelOp::Clear => 0,
        };

        pts.iter()
            .filter(|p| self.set_pixel_at(p.x, p.y, val))
            .count()
    }

    /// Render points with a specific RGB color.
    ///
    /// For 8-bit rasters, the color is converted to grayscale.
    pub fn render_points_color(&mut self, pts: &[Point], color: Color) -> usize {
        let val = match self.depth() {
            PixelDepth::Bit8 => color.to_gray() as u32,
            PixelDepth::Bit32 => color.to_pixel32(),
        };
        self.render_points(pts, PixelOp::Set(val))
    }

    /// Render a line from `p1` to `p2`.
    ///
    /// Rendering the same line twice leaves the raster as rendering it once.
    pub fn render_line(&mut self, p1: Point, p2: Point, width: u32, op: PixelOp) -> usize {
        let pts = generate_wide_line_points(p1, p2, width);
        self.render_points(&pts, op)
    }

    /// Render a circle outline with a specific color.
    ///
    /// Widths above 1 draw concentric outlines towards the center.
    pub fn render_circle_color(
        &mut self,
        center: Point,
        radius: u32,
        width: u32,
        color: Color,
    ) -> usize {
        let mut n = 0;
        for w in 0..width.max(1).min(radius + 1) {
            let pts = generate_circle_points(center, radius - w);
            n += self.render_points_color(&pts, color);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Raster;

    #[test]
    fn test_line_endpoints_included() {
        let pts = generate_line_points(Point::new(0, 0), Point::new(5, 2));
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(5, 2)));
        assert_eq!(pts.len(), 6);
    }

    #[test]
    fn test_single_point_line() {
        let pts = generate_line_points(Point::new(3, 3), Point::new(3, 3));
        assert_eq!(pts, vec![Point::new(3, 3)]);
    }

    #[test]
    fn test_wide_diagonal_is_4_connected() {
        let pts = generate_wide_line_points(Point::new(0, 0), Point::new(4, 4), 2);
        // (1,1) must share an edge with one of (0,1)/(1,0)
        assert!(pts.contains(&Point::new(0, 1)) || pts.contains(&Point::new(1, 0)));
    }

    #[test]
    fn test_render_line_clips_and_is_idempotent() {
        let raster = Raster::new_filled(8, 8, PixelDepth::Bit8, 255).unwrap();
        let mut once = raster.to_mut();
        once.render_line(Point::new(-5, 3), Point::new(20, 3), 2, PixelOp::Clear);
        let mut twice = raster.to_mut();
        twice.render_line(Point::new(-5, 3), Point::new(20, 3), 2, PixelOp::Clear);
        twice.render_line(Point::new(-5, 3), Point::new(20, 3), 2, PixelOp::Clear);
        assert_eq!(once.data(), twice.data());
        // Row 3 and the parallel row 2 are fully cleared
        assert_eq!(once.data().iter().filter(|&&v| v == 0).count(), 16);
    }

    #[test]
    fn test_circle_outline_symmetric() {
        let pts = generate_circle_points(Point::new(10, 10), 3);
        assert!(pts.contains(&Point::new(13, 10)));
        assert!(pts.contains(&Point::new(7, 10)));
        assert!(pts.contains(&Point::new(10, 13)));
        assert!(pts.contains(&Point::new(10, 7)));
    }
}
