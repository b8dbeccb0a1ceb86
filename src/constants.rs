// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.

/// Frames are decoded to `f32`; this is the size of one stacked sample.
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

/// The default sigma-rejection multiplier. Callers have reasonably used
/// anything between 0.5 (aggressive) and 1.5 (permissive).
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 1.0;

/// The default memory budget for a single tile stack.
pub const DEFAULT_MEMORY_BUDGET: &str = "512MiB";

/// The default glob pattern for finding frames in a source directory.
pub const DEFAULT_FRAME_GLOB: &str = "*.png";

/// The default output filename for a stacked image.
pub const DEFAULT_OUTPUT_FILENAME: &str = "stacked.png";
