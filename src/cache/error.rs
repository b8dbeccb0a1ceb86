// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors when reading from or writing to a tile cache.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error(
        "Cached tile stack for '{key}' has shape {found:?}, but {expected:?} was expected; the cache is stale or corrupted (try 'substacker cache clear')"
    )]
    Corrupted {
        key: String,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error("Cache index references payload '{payload}', but it does not exist")]
    MissingPayload { payload: String },

    #[error("Cached payload does not start with the expected magic bytes")]
    BadMagic,

    #[error("Cached payload declares an implausibly large shape ({num_frames} x {height} x {width})")]
    HugeShape {
        num_frames: usize,
        height: usize,
        width: usize,
    },

    #[error("Cached payload is {found} bytes long, but its header implies {expected}")]
    BadLength { expected: usize, found: usize },

    #[error("Couldn't (de)serialize the cache index: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
