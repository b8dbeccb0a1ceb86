// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Information about a set of input frames.

use std::path::{Path, PathBuf};

use thiserror::Error;
use vec1::Vec1;

use crate::constants::DEFAULT_FRAME_GLOB;
use crate::io::read::{frame_dimensions, FrameReadError};
use crate::io::{get_all_matches_from_glob, GlobError};

/// A sorted set of sub-frame files sharing a common geometry.
#[derive(Debug, Clone)]
pub struct FrameSet {
    /// The frame files, lexicographically sorted. A frame's index in the
    /// stack is its position here.
    pub frames: Vec1<PathBuf>,

    /// The directory the frames live in (canonicalized where possible). Used
    /// as part of tile cache keys.
    pub source_dir: PathBuf,

    /// The number of pixel rows in every frame.
    pub height: usize,

    /// The number of pixel columns in every frame.
    pub width: usize,
}

impl FrameSet {
    /// Discover frames from a source directory and/or a glob pattern. When
    /// both are given, the pattern is taken as relative to the directory;
    /// when only a directory is given, [`DEFAULT_FRAME_GLOB`] is used.
    ///
    /// The common geometry is probed from the first frame's header, and every
    /// other frame's header is checked against it. Full decoding happens
    /// later, tile by tile.
    pub fn new(dir: Option<&Path>, pattern: Option<&str>) -> Result<FrameSet, FrameSetError> {
        let pattern = match (dir, pattern) {
            (Some(d), Some(p)) => d.join(p).display().to_string(),
            (Some(d), None) => d.join(DEFAULT_FRAME_GLOB).display().to_string(),
            (None, Some(p)) => p.to_string(),
            (None, None) => return Err(FrameSetError::NoInput),
        };

        let matches = get_all_matches_from_glob(&pattern)?;
        let frames =
            Vec1::try_from_vec(matches).map_err(|_| FrameSetError::NoFrames { glob: pattern })?;

        let source_dir = {
            let parent = match frames.first().parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            // Canonicalize so that cache keys survive being invoked from
            // different working directories.
            parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf())
        };

        let (height, width) = frame_dimensions(frames.first())?;
        for frame in frames.iter().skip(1) {
            let (found_h, found_w) = frame_dimensions(frame)?;
            if (found_h, found_w) != (height, width) {
                return Err(FrameReadError::MismatchedDimensions {
                    path: frame.display().to_string(),
                    expected_h: height,
                    expected_w: width,
                    found_h,
                    found_w,
                }
                .into());
            }
        }

        Ok(FrameSet {
            frames,
            source_dir,
            height,
            width,
        })
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Error, Debug)]
pub enum FrameSetError {
    #[error("No source directory or glob pattern was supplied; there is nothing to stack")]
    NoInput,

    #[error("No frames matched {glob}")]
    NoFrames { glob: String },

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    Frame(#[from] FrameReadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_frame(path: &Path, height: u32, width: u32) {
        let buf: image::ImageBuffer<image::Luma<u16>, Vec<u16>> =
            image::ImageBuffer::from_fn(width, height, |x, y| image::Luma([(100 + x + y) as u16]));
        buf.save(path).unwrap();
    }

    #[test]
    fn discovers_and_sorts_frames() {
        let tmp = tempfile::tempdir().unwrap();
        // Written out of order; discovery must sort.
        write_frame(&tmp.path().join("sub_002.png"), 4, 6);
        write_frame(&tmp.path().join("sub_000.png"), 4, 6);
        write_frame(&tmp.path().join("sub_001.png"), 4, 6);

        let set = FrameSet::new(Some(tmp.path()), None).unwrap();
        assert_eq!(set.num_frames(), 3);
        assert_eq!((set.height, set.width), (4, 6));
        let names: Vec<_> = set
            .frames
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["sub_000.png", "sub_001.png", "sub_002.png"]);
    }

    #[test]
    fn mismatched_geometry_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_frame(&tmp.path().join("sub_000.png"), 4, 6);
        write_frame(&tmp.path().join("sub_001.png"), 4, 7);

        let result = FrameSet::new(Some(tmp.path()), None);
        assert!(matches!(
            result,
            Err(FrameSetError::Frame(
                FrameReadError::MismatchedDimensions { .. }
            ))
        ));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = FrameSet::new(Some(tmp.path()), None);
        assert!(matches!(result, Err(FrameSetError::NoFrames { .. })));
    }

    #[test]
    fn no_input_is_an_error() {
        assert!(matches!(FrameSet::new(None, None), Err(FrameSetError::NoInput)));
    }
}
