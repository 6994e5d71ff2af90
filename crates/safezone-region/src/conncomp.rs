//! Connected component analysis
//!
//! Finds connected components of the cells selected by a [`Foreground`]
//! rule, using a breadth-first walk over a visited mask.

use crate::error::{RegionError, RegionResult};
use safezone_core::{PixelDepth, PointF, Raster};
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbour offsets for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

/// Which cells belong to the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Foreground {
    /// Any non-zero cell
    #[default]
    NonZero,
    /// Cells equal to the given value
    Value(u32),
}

impl Foreground {
    /// Whether a cell value is foreground
    #[inline]
    pub fn matches(self, val: u32) -> bool {
        match self {
            Foreground::NonZero => val != 0,
            Foreground::Value(v) => val == v,
        }
    }
}

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BoundingBox {
    /// Whether (x, y) lies inside the box
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w && y < self.y + self.h
    }
}

/// A connected component in a raster
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    /// Label, in order of discovery (row-major by first pixel), from 1
    pub label: u32,
    /// Bounding box of this component
    pub bounds: BoundingBox,
    /// Member pixels as (x, y)
    pub pixels: Vec<(u32, u32)>,
}

impl ConnectedComponent {
    /// Number of pixels in this component
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Mean position of the member pixels
    pub fn centroid(&self) -> PointF {
        let n = self.pixels.len().max(1) as f64;
        let (sx, sy) = self
            .pixels
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f64, sy + y as f64));
        PointF::new(sx / n, sy / n)
    }
}

/// Find all connected components of foreground cells in an 8-bpp raster
///
/// Components are returned in discovery order, scanning rows top to bottom.
pub fn find_connected_components(
    raster: &Raster,
    foreground: Foreground,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    if raster.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bpp",
            actual: raster.depth().bits(),
        });
    }

    let w = raster.width();
    let h = raster.height();
    let data = raster.data();
    let mut visited = vec![false; data.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || !foreground.matches(data[idx]) {
                continue;
            }

            visited[idx] = true;
            queue.push_back((x, y));
            let mut pixels = Vec::new();
            let (mut minx, mut miny, mut maxx, mut maxy) = (x, y, x, y);

            while let Some((cx, cy)) = queue.pop_front() {
                pixels.push((cx, cy));
                minx = minx.min(cx);
                maxx = maxx.max(cx);
                miny = miny.min(cy);
                maxy = maxy.max(cy);

                for &(dx, dy) in connectivity.offsets() {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                        continue;
                    }
                    let nidx = (ny as u32 * w + nx as u32) as usize;
                    if !visited[nidx] && foreground.matches(data[nidx]) {
                        visited[nidx] = true;
                        queue.push_back((nx as u32, ny as u32));
                    }
                }
            }

            components.push(ConnectedComponent {
                label: components.len() as u32 + 1,
                bounds: BoundingBox {
                    x: minx,
                    y: miny,
                    w: maxx - minx + 1,
                    h: maxy - miny + 1,
                },
                pixels,
            });
        }
    }

    Ok(components)
}

/// Count connected components without keeping their pixels
pub fn count_components(
    raster: &Raster,
    foreground: Foreground,
    connectivity: ConnectivityType,
) -> RegionResult<usize> {
    Ok(find_connected_components(raster, foreground, connectivity)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(rows: &[&str]) -> Raster {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| if b == b'x' { 255 } else { 0 }))
            .collect();
        Raster::from_vec(w, h, PixelDepth::Bit8, data).unwrap()
    }

    #[test]
    fn test_diagonal_connectivity() {
        let r = raster(&["x..", ".x.", "..x"]);
        let four = find_connected_components(&r, Foreground::NonZero, ConnectivityType::FourWay)
            .unwrap();
        let eight = find_connected_components(&r, Foreground::NonZero, ConnectivityType::EightWay)
            .unwrap();
        assert_eq!(four.len(), 3);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].pixel_count(), 3);
        assert_eq!(
            eight[0].bounds,
            BoundingBox {
                x: 0,
                y: 0,
                w: 3,
                h: 3
            }
        );
    }

    #[test]
    fn test_value_foreground_and_centroid() {
        let r = raster(&["xx..", "xx..", "...."]);
        let comps =
            find_connected_components(&r, Foreground::Value(0), ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count(), 8);

        let comps = find_connected_components(&r, Foreground::NonZero, ConnectivityType::FourWay)
            .unwrap();
        let c = comps[0].centroid();
        assert!((c.x - 0.5).abs() < 1e-9);
        assert!((c.y - 0.5).abs() < 1e-9);
        assert!(comps[0].bounds.contains(1, 1));
        assert!(!comps[0].bounds.contains(2, 0));
    }

    #[test]
    fn test_discovery_order() {
        let r = raster(&["..x", "x..", "..."]);
        let comps = find_connected_components(&r, Foreground::NonZero, ConnectivityType::FourWay)
            .unwrap();
        assert_eq!(comps[0].pixels[0], (2, 0));
        assert_eq!(comps[1].pixels[0], (0, 1));
        assert_eq!(comps[1].label, 2);
    }

    #[test]
    fn test_rgb_rejected() {
        let r = Raster::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(count_components(&r, Foreground::NonZero, ConnectivityType::FourWay).is_err());
    }
}
