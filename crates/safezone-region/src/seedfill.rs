//! Seed fill operations
//!
//! Flood fill from a seed cell over all connected cells that share the
//! seed's exact value.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use safezone_core::RasterMut;
use std::collections::VecDeque;

/// Flood fill from a seed point
///
/// Replaces the seed's value with `new_value` in every cell connected to
/// it through cells of the same value.
///
/// # Arguments
///
/// * `raster` - Raster to fill in place
/// * `seed_x`, `seed_y` - Starting point
/// * `new_value` - Value to write
/// * `connectivity` - 4-way or 8-way
///
/// # Returns
///
/// The number of cells filled. Zero if the seed already holds `new_value`.
pub fn floodfill(
    raster: &mut RasterMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    let width = raster.width();
    let height = raster.height();

    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }

    let w = width as usize;
    let data = raster.data_mut();
    let old_value = data[seed_y as usize * w + seed_x as usize];

    if old_value == new_value {
        return Ok(0);
    }

    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    data[seed_y as usize * w + seed_x as usize] = new_value;
    queue.push_back((seed_x, seed_y));

    // Cells are recoloured when queued so each is visited once
    while let Some((x, y)) = queue.pop_front() {
        filled_count += 1;

        for &(dx, dy) in connectivity.offsets() {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                continue;
            }
            let idx = ny as usize * w + nx as usize;
            if data[idx] == old_value {
                data[idx] = new_value;
                queue.push_back((nx as u32, ny as u32));
            }
        }
    }

    Ok(filled_count)
}
