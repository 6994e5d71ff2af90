//! Structuring elements for morphological operations
//!
//! A kernel is a square grid of hit / don't-care cells with its origin at
//! the centre cell. Only hits take part in erosion and dilation.

use crate::{MorphError, MorphResult};

/// Shape of a square structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelType {
    /// Every cell is a hit
    #[default]
    Rect,
    /// Centre row and centre column
    Cross,
    /// Ellipse inscribed in the square
    Ellipse,
}

/// Square structuring element
#[derive(Debug, Clone)]
pub struct Kernel {
    size: u32,
    kernel_type: KernelType,
    origin: u32,
    hits: Vec<bool>,
}

impl Kernel {
    /// Create a `size` x `size` kernel of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidKernel`] if `size` is zero.
    pub fn new(size: u32, kernel_type: KernelType) -> MorphResult<Self> {
        if size == 0 {
            return Err(MorphError::InvalidKernel(
                "kernel size must be at least 1".to_string(),
            ));
        }

        let n = size as usize;
        let origin = size / 2;
        let mut hits = vec![false; n * n];

        match kernel_type {
            KernelType::Rect => hits.fill(true),
            KernelType::Cross => {
                let c = origin as usize;
                for i in 0..n {
                    hits[c * n + i] = true;
                    hits[i * n + c] = true;
                }
            }
            KernelType::Ellipse => fill_ellipse(&mut hits, n),
        }

        Ok(Kernel {
            size,
            kernel_type,
            origin,
            hits,
        })
    }

    /// Create a rectangular kernel
    pub fn rect(size: u32) -> MorphResult<Self> {
        Self::new(size, KernelType::Rect)
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Shape this kernel was built with
    #[inline]
    pub fn kernel_type(&self) -> KernelType {
        self.kernel_type
    }

    /// Whether the cell at (x, y) is a hit
    pub fn is_hit(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.hits[(y * self.size + x) as usize]
    }

    /// Number of hit cells
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Iterate over hit positions relative to the origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let origin = self.origin as i32;
        let size = self.size;

        self.hits
            .iter()
            .enumerate()
            .filter_map(move |(idx, &hit)| {
                if hit {
                    let x = (idx as u32 % size) as i32;
                    let y = (idx as u32 / size) as i32;
                    Some((x - origin, y - origin))
                } else {
                    None
                }
            })
    }
}

/// Fill an `n` x `n` grid with the inscribed ellipse, row by row.
///
/// Each row gets the horizontal half-extent `round(c * sqrt(1 - dy²/r²))`
/// around the centre column.
fn fill_ellipse(hits: &mut [bool], n: usize) {
    let r = (n / 2) as i64;
    let c = (n / 2) as i64;
    if r == 0 {
        hits.fill(true);
        return;
    }
    let inv_r2 = 1.0 / (r * r) as f64;

    for row in 0..n {
        let dy = row as i64 - r;
        if dy.abs() > r {
            continue;
        }
        let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i64;
        let j1 = (c - dx).max(0) as usize;
        let j2 = ((c + dx + 1) as usize).min(n);
        for cell in &mut hits[row * n + j1..row * n + j2] {
            *cell = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(Kernel::new(0, KernelType::Rect).is_err());
    }

    #[test]
    fn test_rect_offsets() {
        let k = Kernel::rect(3).unwrap();
        assert_eq!(k.hit_count(), 9);
        let offsets: Vec<_> = k.hit_offsets().collect();
        assert_eq!(offsets.first(), Some(&(-1, -1)));
        assert_eq!(offsets.last(), Some(&(1, 1)));
    }

    #[test]
    fn test_cross() {
        let k = Kernel::new(5, KernelType::Cross).unwrap();
        assert_eq!(k.hit_count(), 9);
        assert!(k.is_hit(2, 0));
        assert!(k.is_hit(0, 2));
        assert!(!k.is_hit(0, 0));
    }

    #[test]
    fn test_ellipse_small_is_cross() {
        let k = Kernel::new(3, KernelType::Ellipse).unwrap();
        assert_eq!(k.hit_count(), 5);
        assert!(!k.is_hit(0, 0));
        assert!(k.is_hit(1, 1));
    }

    #[test]
    fn test_ellipse_larger() {
        let k = Kernel::new(5, KernelType::Ellipse).unwrap();
        // Rows: 1, 5, 5, 5, 1 -> corners are empty, the middle band is full
        assert!(k.is_hit(2, 0));
        assert!(!k.is_hit(1, 0));
        assert!(k.is_hit(0, 2));
        assert!(!k.is_hit(0, 0));
        assert_eq!(k.hit_count(), 17);
    }

    #[test]
    fn test_single_cell() {
        for t in [KernelType::Rect, KernelType::Cross, KernelType::Ellipse] {
            let k = Kernel::new(1, t).unwrap();
            assert_eq!(k.hit_offsets().collect::<Vec<_>>(), vec![(0, 0)]);
        }
    }
}
