// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assembling reduced tiles into the full output planes.
//!
//! Tile bounds come straight from the plan, so blitting is plain slice
//! assignment; the plan guarantees tiles cover the output exactly once.
//! Once every tile has landed, the value plane is normalized to `[0, 1]`
//! over its finite extrema for quantization.

use ndarray::{s, Array2, ArrayView2};

use crate::reduce::ReducedTile;
use crate::tiling::Tile;

/// The full-size output planes, filled in tile by tile.
pub struct Mosaic {
    /// Stacked pixel values. NaN where a pixel had no surviving samples.
    pub values: Array2<f32>,

    /// Per-pixel rejected-sample counts.
    pub rejections: Array2<u32>,
}

impl Mosaic {
    pub fn new(height: usize, width: usize) -> Mosaic {
        Mosaic {
            values: Array2::from_elem((height, width), f32::NAN),
            rejections: Array2::zeros((height, width)),
        }
    }

    /// Copy a reduced tile into its place in the planes.
    pub fn blit(&mut self, tile: Tile, reduced: &ReducedTile) {
        self.values
            .slice_mut(s![tile.y0..tile.y1, tile.x0..tile.x1])
            .assign(&reduced.values);
        self.rejections
            .slice_mut(s![tile.y0..tile.y1, tile.x0..tile.x1])
            .assign(&reduced.rejections);
    }

    /// Rescale the value plane to `[0, 1]` in place over its finite minimum
    /// and maximum, returning the original extrema. NaN pixels are left NaN.
    /// If the plane has no finite dynamic range (all NaN, or a single level)
    /// it is zeroed and `None` is returned.
    pub fn normalize(&mut self) -> Option<(f32, f32)> {
        let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
        for &v in self.values.iter() {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if !(max > min) {
            self.values.fill(0.0);
            return None;
        }
        let range = max - min;
        self.values.mapv_inplace(|v| (v - min) / range);
        Some((min, max))
    }

    /// The number of pixels with no surviving samples.
    pub fn num_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// The rejection counts as a plane suitable for image output. Counts are
    /// scaled so that `num_frames` rejections map to full white.
    pub fn rejection_plane(&self, num_frames: usize) -> Array2<f32> {
        self.rejections.mapv(|r| r as f32 / num_frames as f32)
    }

    pub fn values_view(&self) -> ArrayView2<f32> {
        self.values.view()
    }
}
