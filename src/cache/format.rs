// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The on-disk payload format for cached tile stacks.
//!
//! Layout: an 8-byte ASCII magic, three little-endian u32s (frames, height,
//! width), then `frames * height * width` little-endian f32 samples in
//! frame-major order. Endianness is pinned so a cache directory can move
//! between machines.

use std::io::Cursor;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use ndarray::{Array3, ArrayView3};

use super::CacheError;

const MAGIC: &[u8; 8] = b"SUBSTK01";
const HEADER_LEN: usize = MAGIC.len() + 3 * 4;

pub(super) fn payload_len(num_frames: usize, height: usize, width: usize) -> usize {
    HEADER_LEN + num_frames * height * width * 4
}

pub(super) fn write_stack(stack: ArrayView3<f32>) -> Vec<u8> {
    let (num_frames, height, width) = stack.dim();
    let mut bytes = Vec::with_capacity(HEADER_LEN + stack.len() * 4);
    bytes.extend_from_slice(MAGIC);
    let mut buf = [0; 4];
    for dim in [num_frames, height, width] {
        LittleEndian::write_u32(&mut buf, dim as u32);
        bytes.extend_from_slice(&buf);
    }
    for &sample in stack.iter() {
        LittleEndian::write_f32(&mut buf, sample);
        bytes.extend_from_slice(&buf);
    }
    bytes
}

pub(super) fn read_stack(bytes: &[u8]) -> Result<Array3<f32>, CacheError> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(CacheError::BadMagic);
    }
    let mut cursor = Cursor::new(&bytes[MAGIC.len()..]);
    let num_frames = cursor.read_u32::<LittleEndian>()? as usize;
    let height = cursor.read_u32::<LittleEndian>()? as usize;
    let width = cursor.read_u32::<LittleEndian>()? as usize;

    let num_samples = num_frames
        .checked_mul(height)
        .and_then(|p| p.checked_mul(width))
        .ok_or(CacheError::HugeShape {
            num_frames,
            height,
            width,
        })?;
    let expected = HEADER_LEN + num_samples * 4;
    if bytes.len() != expected {
        return Err(CacheError::BadLength {
            expected,
            found: bytes.len(),
        });
    }

    let mut samples = vec![0.0; num_samples];
    cursor.read_f32_into::<LittleEndian>(&mut samples)?;
    // The length check above makes this infallible.
    Ok(Array3::from_shape_vec((num_frames, height, width), samples)
        .expect("shape matches sample count"))
}
