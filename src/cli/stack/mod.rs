// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::common::ARG_FILE_HELP;
use crate::{
    cache::{CacheError, TileCache},
    constants::{DEFAULT_MEMORY_BUDGET, DEFAULT_OUTPUT_FILENAME, DEFAULT_SIGMA_MULTIPLIER},
    context::{FrameSet, FrameSetError},
    io::write::IMAGE_OUTPUT_EXTENSIONS,
    messages,
    params::StackParams,
    tiling::{TilePlan, TilingError},
    unit_parsing::{parse_bytes, UnitParseError},
    SubstackerError,
};

lazy_static::lazy_static! {
    static ref SIGMA_HELP: String =
        format!("The sigma-clipping multiplier: samples outside median ± sigma * std are rejected before averaging. Default: {DEFAULT_SIGMA_MULTIPLIER}");

    static ref MEMORY_BUDGET_HELP: String =
        format!("The maximum amount of memory a single tile stack may occupy (e.g. 512MiB, 2GB, or a plain number of bytes). Default: {DEFAULT_MEMORY_BUDGET}");

    static ref OUTPUT_HELP: String =
        format!("Path to the output stacked image. Supported formats: {}. Default: {DEFAULT_OUTPUT_FILENAME}", *IMAGE_OUTPUT_EXTENSIONS);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct StackArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The directory containing the sub-frames to stack.
    #[clap(short = 'd', long, help_heading = "INPUT FILES")]
    pub(super) source_dir: Option<PathBuf>,

    /// The glob pattern used to discover frames. Relative to the source
    /// directory when one is given. Default: *.png
    #[clap(short = 'g', long, help_heading = "INPUT FILES")]
    pub(super) frame_glob: Option<String>,

    #[clap(short = 'm', long, help = MEMORY_BUDGET_HELP.as_str(), help_heading = "STACKING")]
    pub(super) memory_budget: Option<String>,

    #[clap(short = 's', long, help = SIGMA_HELP.as_str(), help_heading = "STACKING")]
    pub(super) sigma: Option<f64>,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Also write a per-pixel rejection-count map to this path.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) rejection_map: Option<PathBuf>,

    /// Cache decoded tile stacks in this directory so that re-runs skip
    /// decoding. No caching happens unless this is given.
    #[clap(long, help_heading = "CACHING")]
    pub(super) cache_dir: Option<PathBuf>,

    /// Ignore any cache directory, even one set in an arguments file.
    #[clap(long, help_heading = "CACHING")]
    #[serde(default)]
    pub(super) no_cache: bool,
}

impl StackArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<StackArgs, SubstackerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let StackArgs {
                args_file: _,
                source_dir,
                frame_glob,
                memory_budget,
                sigma,
                output,
                rejection_map,
                cache_dir,
                no_cache,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(StackArgs {
                args_file: None,
                source_dir: cli_args.source_dir.or(source_dir),
                frame_glob: cli_args.frame_glob.or(frame_glob),
                memory_budget: cli_args.memory_budget.or(memory_budget),
                sigma: cli_args.sigma.or(sigma),
                output: cli_args.output.or(output),
                rejection_map: cli_args.rejection_map.or(rejection_map),
                cache_dir: cli_args.cache_dir.or(cache_dir),
                no_cache: cli_args.no_cache || no_cache,
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<StackParams, SubstackerError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            source_dir,
            frame_glob,
            memory_budget,
            sigma,
            output,
            rejection_map,
            cache_dir,
            no_cache,
        } = self;

        let sigma = sigma.unwrap_or(DEFAULT_SIGMA_MULTIPLIER);
        if !(sigma > 0.0) {
            return Err(StackArgsError::SigmaNotPositive { sigma }.into());
        }

        let frames = FrameSet::new(source_dir.as_deref(), frame_glob.as_deref())
            .map_err(StackArgsError::from)?;
        messages::print_input_details(&frames);
        if frames.num_frames() < 3 {
            warn!("Fewer than 3 frames: sigma clipping has very little to work with");
        }

        let budget_bytes = parse_bytes(
            memory_budget
                .as_deref()
                .unwrap_or(DEFAULT_MEMORY_BUDGET),
        )
        .map_err(StackArgsError::from)?;
        let plan = TilePlan::new(
            frames.num_frames(),
            frames.height,
            frames.width,
            budget_bytes,
        )
        .map_err(StackArgsError::from)?;
        messages::print_tiling_details(&plan, budget_bytes, sigma);

        let cache = match (cache_dir, no_cache) {
            (Some(dir), false) => {
                info!("Using tile cache at {}", dir.display());
                Some(TileCache::open(&dir).map_err(StackArgsError::from)?)
            }
            (Some(_), true) => {
                debug!("A cache directory was given but --no-cache wins");
                None
            }
            (None, _) => None,
        };

        Ok(StackParams {
            frames,
            plan,
            sigma,
            cache,
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME)),
            rejection_output: rejection_map,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SubstackerError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum StackArgsError {
    #[error("The sigma multiplier must be positive, but {sigma} was given")]
    SigmaNotPositive { sigma: f64 },

    #[error(transparent)]
    Frames(#[from] FrameSetError),

    #[error(transparent)]
    UnitParse(#[from] UnitParseError),

    #[error(transparent)]
    Tiling(#[from] TilingError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
