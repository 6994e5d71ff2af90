//! Integer and floating-point raster coordinates
//!
//! `x` is the column, `y` is the row, matching the accessor convention used
//! by [`Raster`](crate::Raster).

use std::ops::{Add, Mul, Sub};

/// Integer pixel position. May lie outside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, k: i32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Sub-pixel position, e.g. a blob centroid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncate to the containing pixel.
    pub fn to_pixel(self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: PointF) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
