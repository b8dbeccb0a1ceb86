// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Info-level reporting on what a run is about to do.

use log::info;

use crate::context::FrameSet;
use crate::tiling::TilePlan;

pub(crate) fn print_input_details(frames: &FrameSet) {
    info!(
        "Stacking {} frames from {}",
        frames.num_frames(),
        frames.source_dir.display()
    );
    info!("  each {} rows x {} cols", frames.height, frames.width);
}

pub(crate) fn print_tiling_details(plan: &TilePlan, budget_bytes: u64, sigma: f64) {
    info!(
        "Tiling: {} tiles ({} x {} grid, nominally {} rows x {} cols each)",
        plan.tiles.len(),
        plan.num_y,
        plan.num_x,
        plan.tile_height,
        plan.tile_width
    );
    info!("  memory budget: {budget_bytes} bytes per tile stack");
    info!("  sigma multiplier: {sigma}");
}
