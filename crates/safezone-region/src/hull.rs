//! Convex hulls of pixel sets
//!
//! Hulls are taken over pixel corners rather than pixel centres, so a
//! single pixel has hull area 1 and a filled rectangle's hull area equals
//! its pixel count.

use safezone_core::PointF;
use std::collections::BTreeMap;

fn cross(o: PointF, a: PointF, b: PointF) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of a point set (Andrew's monotone chain)
///
/// Returns the hull vertices in counter-clockwise order without repeating
/// the first point. Collinear points are dropped.
pub fn convex_hull(points: &[PointF]) -> Vec<PointF> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<PointF> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Area of a simple polygon (shoelace formula)
pub fn polygon_area(polygon: &[PointF]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() / 2.0
}

/// Area of the convex hull covering a set of pixels
///
/// Only the leftmost and rightmost pixel of each row can contribute hull
/// vertices, so the hull is built from their outer corners.
pub fn convex_hull_area(pixels: &[(u32, u32)]) -> f64 {
    let mut rows: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for &(x, y) in pixels {
        rows.entry(y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(x);
                *hi = (*hi).max(x);
            })
            .or_insert((x, x));
    }

    let mut corners = Vec::with_capacity(rows.len() * 4);
    for (&y, &(lo, hi)) in &rows {
        let (y0, y1) = (y as f64, y as f64 + 1.0);
        let (x0, x1) = (lo as f64, hi as f64 + 1.0);
        corners.extend_from_slice(&[
            PointF::new(x0, y0),
            PointF::new(x0, y1),
            PointF::new(x1, y0),
            PointF::new(x1, y1),
        ]);
    }

    polygon_area(&convex_hull(&corners))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_hull() {
        let pts = [
            PointF::new(0.0, 0.0),
            PointF::new(2.0, 0.0),
            PointF::new(1.0, 1.0),
            PointF::new(2.0, 2.0),
            PointF::new(0.0, 2.0),
            PointF::new(1.0, 0.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!((polygon_area(&hull) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_pixel() {
        assert!((convex_hull_area(&[(3, 4)]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangle_is_convex() {
        let pixels: Vec<_> = (0..4).flat_map(|y| (0..5).map(move |x| (x, y))).collect();
        assert!((convex_hull_area(&pixels) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_l_shape_hull() {
        // ##
        // #.
        let hull = convex_hull_area(&[(0, 0), (1, 0), (0, 1)]);
        assert!((hull - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_polygon() {
        assert_eq!(polygon_area(&[PointF::new(0.0, 0.0), PointF::new(1.0, 1.0)]), 0.0);
    }
}
