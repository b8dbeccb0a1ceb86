// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Materialising a tile stack from the source frames.
//!
//! A tile stack is a `(frames, tile height, tile width)` array holding the
//! same sub-rectangle of every frame. With a cache in play, a hit skips
//! decoding entirely; on a miss the frames are decoded, the tile is sliced
//! out, and the stack is written back before being returned. Any frame that
//! fails to decode, or whose dimensions disagree with the rest of the set,
//! fails the whole run rather than stacking a partial pixel column.

#[cfg(test)]
mod tests;

use log::debug;
use ndarray::{s, Array3};
use thiserror::Error;

use crate::cache::{CacheError, CacheKey, TileCache};
use crate::context::FrameSet;
use crate::io::read::{read_frame, FrameReadError};
use crate::tiling::Tile;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Frame(#[from] FrameReadError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Produce the tile stack for `tile`, going through `cache` if one is
/// supplied.
pub fn load_tile_stack(
    frames: &FrameSet,
    tile: Tile,
    cache: Option<&TileCache>,
) -> Result<Array3<f32>, LoadError> {
    let num_frames = frames.num_frames();
    let key = cache.map(|_| CacheKey {
        source_dir: frames.source_dir.display().to_string(),
        tile,
    });
    if let (Some(cache), Some(key)) = (cache, key.as_ref()) {
        if let Some(stack) = cache.load(key, num_frames)? {
            return Ok(stack);
        }
    }

    debug!("decoding {num_frames} frames for tile {tile}");
    let mut stack = Array3::zeros((num_frames, tile.height(), tile.width()));
    for (i, path) in frames.frames.iter().enumerate() {
        let frame = read_frame(path)?;
        let (height, width) = frame.dim();
        if (height, width) != (frames.height, frames.width) {
            return Err(FrameReadError::MismatchedDimensions {
                path: path.display().to_string(),
                expected_h: frames.height,
                expected_w: frames.width,
                found_h: height,
                found_w: width,
            }
            .into());
        }
        stack
            .slice_mut(s![i, .., ..])
            .assign(&frame.slice(s![tile.y0..tile.y1, tile.x0..tile.x1]));
    }

    if let (Some(cache), Some(key)) = (cache, key.as_ref()) {
        cache.store(key, stack.view())?;
    }
    Ok(stack)
}
