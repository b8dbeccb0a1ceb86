// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Encoding output planes as images.

use std::path::Path;

use itertools::Itertools;
use ndarray::ArrayView2;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

lazy_static::lazy_static! {
    /// All write-out image formats supported.
    pub static ref IMAGE_OUTPUT_EXTENSIONS: String = ImageOutputType::iter().join(", ");
}

#[derive(Debug, Display, Clone, Copy, EnumIter, EnumString)]
#[allow(non_camel_case_types)]
pub enum ImageOutputType {
    #[strum(serialize = "png")]
    Png,

    #[strum(serialize = "tif")]
    Tif,

    #[strum(serialize = "tiff")]
    Tiff,
}

/// Write a [0, 1]-normalized plane as a 16-bit grayscale image. NaN is the
/// missing-data marker and is written as 0; out-of-range finite values are
/// clamped.
pub fn write_image(plane: ArrayView2<f32>, path: &Path) -> Result<(), ImageWriteError> {
    // Complain about the extension before doing any work.
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .and_then(|e| e.parse::<ImageOutputType>().ok())
    {
        Some(_) => (),
        None => {
            return Err(ImageWriteError::UnsupportedExt {
                path: path.display().to_string(),
            })
        }
    }

    let (height, width) = plane.dim();
    let mut buf: image::ImageBuffer<image::Luma<u16>, Vec<u16>> =
        image::ImageBuffer::new(width as u32, height as u32);
    for ((row, col), &v) in plane.indexed_iter() {
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let quantized = (v * f32::from(u16::MAX)).round() as u16;
        buf.put_pixel(col as u32, row as u32, image::Luma([quantized]));
    }
    buf.save(path).map_err(|err| ImageWriteError::Encode {
        path: path.display().to_string(),
        err,
    })
}

#[derive(Error, Debug)]
pub enum ImageWriteError {
    #[error("Couldn't write an image to {path}; supported extensions are: {}", *IMAGE_OUTPUT_EXTENSIONS)]
    UnsupportedExt { path: String },

    #[error("Couldn't encode image {path}: {err}")]
    Encode {
        path: String,
        err: image::ImageError,
    },
}
