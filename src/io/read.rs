// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Decoding frame images into arrays.

use std::path::Path;

use image::DynamicImage;
use ndarray::Array2;
use thiserror::Error;

/// Probe a frame's dimensions (rows, cols) from its header without decoding
/// the pixel data.
pub fn frame_dimensions(path: &Path) -> Result<(usize, usize), FrameReadError> {
    let (width, height) = image::image_dimensions(path).map_err(|err| FrameReadError::Decode {
        path: path.display().to_string(),
        err,
    })?;
    Ok((height as usize, width as usize))
}

/// Decode a single frame into a 2-D `f32` array (rows × cols).
///
/// 8-bit and 16-bit grayscale inputs are supported directly; anything else is
/// converted to 16-bit luma. Sample values keep their integer scale; the
/// stacking statistics don't care about the absolute scale, and the final
/// output is normalized anyway.
pub fn read_frame(path: &Path) -> Result<Array2<f32>, FrameReadError> {
    let img = image::open(path).map_err(|err| FrameReadError::Decode {
        path: path.display().to_string(),
        err,
    })?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let data: Vec<f32> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        other => other
            .into_luma16()
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect(),
    };
    Ok(Array2::from_shape_vec((height, width), data)
        .expect("buffer length always matches the decoded image dimensions"))
}

#[derive(Error, Debug)]
pub enum FrameReadError {
    #[error("Couldn't decode frame {path}: {err}")]
    Decode {
        path: String,
        err: image::ImageError,
    },

    #[error("Frame {path} is {found_h}x{found_w} (rows x cols), but the frame set is {expected_h}x{expected_w}; all frames must share a geometry")]
    MismatchedDimensions {
        path: String,
        expected_h: usize,
        expected_w: usize,
        found_h: usize,
        found_w: usize,
    },
}
