// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for a stacking run.
//!
//! If a [`StackParams`] has been created, then it is fully validated and a
//! run can only fail on IO or a poisoned cache. Argument checking lives with
//! the CLI code.

mod error;

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::assemble::Mosaic;
use crate::cache::TileCache;
use crate::context::FrameSet;
use crate::io::write::write_image;
use crate::loader::load_tile_stack;
use crate::reduce::reduce_stack;
use crate::tiling::{Tile, TilePlan};
use crate::{reduce::ReducedTile, PROGRESS_BARS};
pub(crate) use error::StackError;

pub(crate) struct StackParams {
    pub(crate) frames: FrameSet,
    pub(crate) plan: TilePlan,
    pub(crate) sigma: f64,
    pub(crate) cache: Option<TileCache>,
    pub(crate) output: PathBuf,
    pub(crate) rejection_output: Option<PathBuf>,
}

impl StackParams {
    pub(crate) fn run(&self) -> Result<(), StackError> {
        let pb = ProgressBar::with_draw_target(
            Some(self.plan.tiles.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:14}: [{wide_bar:.blue}] {pos:3}/{len:3} tiles ({elapsed_precise}<{eta_precise})").unwrap()
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("Stacking tiles");

        // Tiles are independent; process them in parallel and fail the run
        // on the first tile error.
        let reduced: Vec<(Tile, ReducedTile)> = self
            .plan
            .tiles
            .par_iter()
            .map(|&tile| {
                let stack = load_tile_stack(&self.frames, tile, self.cache.as_ref())?;
                let reduced = reduce_stack(stack.view(), self.sigma);
                pb.inc(1);
                Ok((tile, reduced))
            })
            .collect::<Result<_, StackError>>()?;
        pb.finish_and_clear();

        let mut mosaic = Mosaic::new(self.frames.height, self.frames.width);
        for (tile, tile_result) in &reduced {
            mosaic.blit(*tile, tile_result);
        }

        let total_rejected: u64 = mosaic.rejections.iter().map(|&r| u64::from(r)).sum();
        let total_samples =
            self.frames.num_frames() as u64 * (self.frames.height * self.frames.width) as u64;
        info!(
            "Rejected {total_rejected} of {total_samples} samples ({:.3}%)",
            100.0 * total_rejected as f64 / total_samples as f64
        );
        let num_missing = mosaic.num_missing();
        if num_missing > 0 {
            warn!("{num_missing} pixels had no surviving samples; they are written as black");
        }

        match mosaic.normalize() {
            Some((min, max)) => debug!("Normalized output from [{min}, {max}] to [0, 1]"),
            None => warn!("Output has no dynamic range; writing a black image"),
        }
        write_image(mosaic.values_view(), &self.output)?;
        info!("Stacked image written to {}", self.output.display());

        if let Some(rejection_output) = &self.rejection_output {
            let plane = mosaic.rejection_plane(self.frames.num_frames());
            write_image(plane.view(), rejection_output)?;
            info!("Rejection map written to {}", rejection_output.display());
        }
        Ok(())
    }
}
