// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Robust per-pixel reduction of a tile stack.
//!
//! Every output pixel is the mean of its samples after a single pass of
//! sigma clipping: samples outside `median ± sigma * std` are rejected
//! before averaging. Non-finite and non-positive samples (dead pixels,
//! sensor dropouts, padding) are treated as rejected from the start. A
//! pixel with no surviving samples becomes NaN and is patched during
//! assembly.


use ndarray::{Array2, ArrayView3, Axis, Zip};

use crate::math::{median, sample_std};

/// The per-pixel outputs for one tile.
pub struct ReducedTile {
    /// Sigma-clipped mean per pixel; NaN where nothing survived.
    pub values: Array2<f32>,

    /// How many of the stack's samples were rejected per pixel, invalid
    /// samples included.
    pub rejections: Array2<u32>,
}

/// Reduce a `(frames, height, width)` stack to a [`ReducedTile`]. Pixels are
/// independent, so the work is parallelised over them.
pub fn reduce_stack(stack: ArrayView3<f32>, sigma: f64) -> ReducedTile {
    let (num_frames, height, width) = stack.dim();
    let mut values = Array2::zeros((height, width));
    let mut rejections = Array2::zeros((height, width));

    Zip::from(&mut values)
        .and(&mut rejections)
        .and(stack.lanes(Axis(0)))
        .par_for_each(|value, rejection, samples| {
            let mut valid: Vec<f32> = samples
                .iter()
                .copied()
                .filter(|s| s.is_finite() && *s > 0.0)
                .collect();
            if valid.is_empty() {
                *value = f32::NAN;
                *rejection = num_frames as u32;
                return;
            }

            let med = median(&mut valid);
            let std = sample_std(&valid);
            let (lo, hi) = (med - sigma as f32 * std, med + sigma as f32 * std);

            let mut sum = 0.0;
            let mut included = 0_u32;
            for &s in &valid {
                if (lo..=hi).contains(&s) {
                    sum += f64::from(s);
                    included += 1;
                }
            }
            // With few samples and a small sigma the interval can exclude
            // everything (e.g. two distinct samples, sigma < 0.7).
            if included == 0 {
                *value = f32::NAN;
            } else {
                *value = (sum / f64::from(included)) as f32;
            }
            *rejection = num_frames as u32 - included;
        });

    ReducedTile { values, rejections }
}
