// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{BYTES_PER_SAMPLE, DEFAULT_MEMORY_BUDGET},
    tiling::TilePlan,
    unit_parsing::parse_bytes,
    SubstackerError,
};

/// Answer "how would these frames be tiled?" without touching any files.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
pub(super) struct PlanArgs {
    /// The number of frames in the set.
    #[clap(short = 'n', long)]
    num_frames: usize,

    /// The number of pixel rows in each frame.
    #[clap(short = 'H', long)]
    height: usize,

    /// The number of pixel columns in each frame.
    #[clap(short = 'W', long)]
    width: usize,

    /// The maximum amount of memory a single tile stack may occupy (e.g.
    /// 512MiB, 2GB, or a plain number of bytes). Default: 512MiB
    #[clap(short = 'm', long)]
    memory_budget: Option<String>,
}

impl PlanArgs {
    pub(super) fn run(self) -> Result<(), SubstackerError> {
        let Self {
            num_frames,
            height,
            width,
            memory_budget,
        } = self;

        let budget_bytes = parse_bytes(
            memory_budget
                .as_deref()
                .unwrap_or(DEFAULT_MEMORY_BUDGET),
        )?;
        let plan = TilePlan::new(num_frames, height, width, budget_bytes)?;

        info!(
            "{} frames of {height} rows x {width} cols under a {budget_bytes} byte budget:",
            num_frames
        );
        info!(
            "  {} tiles ({} x {} grid, nominally {} rows x {} cols each)",
            plan.tiles.len(),
            plan.num_y,
            plan.num_x,
            plan.tile_height,
            plan.tile_width
        );
        let column_bytes = num_frames * BYTES_PER_SAMPLE;
        info!(
            "  nominal tile stack size: {} bytes",
            plan.tile_height * plan.tile_width * column_bytes
        );
        for tile in &plan.tiles {
            info!("    {tile}");
        }
        Ok(())
    }
}
