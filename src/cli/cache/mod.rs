// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Subcommand;
use log::info;

use crate::{cache::TileCache, SubstackerError};

#[derive(Debug, Subcommand)]
pub(super) enum CacheCommand {
    #[clap(about = "List the entries of a tile cache directory.")]
    List {
        /// The cache directory.
        cache_dir: PathBuf,
    },

    #[clap(about = "Delete all entries of a tile cache directory.")]
    Clear {
        /// The cache directory.
        cache_dir: PathBuf,
    },
}

impl CacheCommand {
    pub(super) fn run(self) -> Result<(), SubstackerError> {
        match self {
            CacheCommand::List { cache_dir } => {
                let cache = TileCache::open(&cache_dir)?;
                let entries = cache.entries();
                if entries.is_empty() {
                    info!("Cache is empty");
                } else {
                    for (key, entry) in entries {
                        info!(
                            "{key}: {} frames x {} rows x {} cols ({} B in {})",
                            entry.num_frames,
                            entry.height,
                            entry.width,
                            entry.payload_bytes(),
                            entry.payload
                        );
                    }
                }
            }

            CacheCommand::Clear { cache_dir } => {
                let cache = TileCache::open(&cache_dir)?;
                let num_removed = cache.clear()?;
                info!("Removed {num_removed} cache entries");
            }
        }
        Ok(())
    }
}
