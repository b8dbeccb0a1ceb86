// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Memory-bounded tiling of the frame plane.

#[cfg(test)]
mod tests;

use std::fmt;

use thiserror::Error;

use crate::constants::BYTES_PER_SAMPLE;

/// A rectangular sub-region of the common frame geometry. Bounds are
/// half-open: columns `x0..x1`, rows `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Tile {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn num_pixels(&self) -> usize {
        self.width() * self.height()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.y0, self.y1, self.x0, self.x1
        )
    }
}

/// A partition of the frame plane into tiles whose per-tile stack fits a
/// memory budget.
#[derive(Debug, Clone)]
pub struct TilePlan {
    /// Row-major tile order.
    pub tiles: Vec<Tile>,

    /// Number of tiles across.
    pub num_x: usize,

    /// Number of tiles down.
    pub num_y: usize,

    /// Nominal tile width \[pixels\]. The rightmost column of tiles takes the
    /// remainder.
    pub tile_width: usize,

    /// Nominal tile height \[pixels\]. The bottom row of tiles takes the
    /// remainder.
    pub tile_height: usize,
}

impl TilePlan {
    /// Plan tiles for `num_frames` frames of `height`×`width` pixels, such
    /// that any one tile's stack stays under `budget_bytes`.
    ///
    /// The budget buys `budget / (4 * num_frames)` pixels per tile; the
    /// maximum tile side is the floor of that figure's square root. Per axis,
    /// the tile count is a ceiling division by that side and the nominal tile
    /// dimension a floor division by the count; the last tile per axis takes
    /// whatever remains. The tiles exactly and disjointly cover the plane.
    pub fn new(
        num_frames: usize,
        height: usize,
        width: usize,
        budget_bytes: u64,
    ) -> Result<TilePlan, TilingError> {
        if num_frames == 0 {
            return Err(TilingError::NoFrames);
        }
        if height == 0 || width == 0 {
            return Err(TilingError::EmptyPlane { height, width });
        }

        // The cost of a single pixel position across the whole stack.
        let column_bytes = (BYTES_PER_SAMPLE * num_frames) as u64;
        let max_pixels = budget_bytes / column_bytes;
        if max_pixels == 0 {
            return Err(TilingError::BudgetTooSmall {
                budget_bytes,
                column_bytes,
            });
        }
        // max_pixels >= 1, so max_side >= 1.
        let max_side = (max_pixels as f64).sqrt().floor() as usize;

        let num_x = (width + max_side - 1) / max_side;
        let num_y = (height + max_side - 1) / max_side;
        let tile_width = width / num_x;
        let tile_height = height / num_y;

        let mut tiles = Vec::with_capacity(num_x * num_y);
        for iy in 0..num_y {
            let y0 = iy * tile_height;
            let y1 = if iy + 1 == num_y {
                height
            } else {
                (iy + 1) * tile_height
            };
            for ix in 0..num_x {
                let x0 = ix * tile_width;
                let x1 = if ix + 1 == num_x {
                    width
                } else {
                    (ix + 1) * tile_width
                };
                tiles.push(Tile { x0, y0, x1, y1 });
            }
        }

        Ok(TilePlan {
            tiles,
            num_x,
            num_y,
            tile_width,
            tile_height,
        })
    }
}

#[derive(Error, Debug)]
pub enum TilingError {
    #[error("The memory budget of {budget_bytes} B cannot hold even one pixel position across all frames ({column_bytes} B); increase the budget or stack fewer frames")]
    BudgetTooSmall {
        budget_bytes: u64,
        column_bytes: u64,
    },

    #[error("Cannot tile a stack of 0 frames")]
    NoFrames,

    #[error("Cannot tile an empty frame plane ({height}x{width})")]
    EmptyPlane { height: usize, width: usize },
}
