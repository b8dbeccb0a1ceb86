// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use approx::assert_abs_diff_eq;

use super::*;
use crate::cache::MemBackend;

/// Write a 16-bit grayscale PNG whose pixel at (x, y) is
/// `base + y * width + x`.
fn write_frame(path: &Path, height: u32, width: u32, base: u16) {
    let buf: image::ImageBuffer<image::Luma<u16>, Vec<u16>> =
        image::ImageBuffer::from_fn(width, height, |x, y| {
            image::Luma([base + (y * width + x) as u16])
        });
    buf.save(path).unwrap();
}

fn test_frame_set(dir: &Path, num_frames: usize, height: u32, width: u32) -> FrameSet {
    for i in 0..num_frames {
        write_frame(
            &dir.join(format!("sub_{i:03}.png")),
            height,
            width,
            1000 * i as u16,
        );
    }
    FrameSet::new(Some(dir), None).unwrap()
}

#[test]
fn slices_the_right_sub_rectangle_of_every_frame() {
    let tmp = tempfile::tempdir().unwrap();
    let frames = test_frame_set(tmp.path(), 3, 6, 8);
    let tile = Tile {
        x0: 2,
        y0: 1,
        x1: 5,
        y1: 4,
    };

    let stack = load_tile_stack(&frames, tile, None).unwrap();
    assert_eq!(stack.dim(), (3, 3, 3));
    // Frame f, tile-local (y, x) maps to source pixel (y + 1, x + 2).
    for f in 0..3 {
        for y in 0..3 {
            for x in 0..3 {
                let expected = 1000.0 * f as f32 + ((y + 1) * 8 + (x + 2)) as f32;
                assert_abs_diff_eq!(stack[(f, y, x)], expected);
            }
        }
    }
}

#[test]
fn second_load_is_served_from_the_cache() {
    let tmp = tempfile::tempdir().unwrap();
    let frames = test_frame_set(tmp.path(), 2, 4, 4);
    let tile = Tile {
        x0: 0,
        y0: 0,
        x1: 4,
        y1: 4,
    };
    let cache = TileCache::with_backend(Box::new(MemBackend::default())).unwrap();

    let first = load_tile_stack(&frames, tile, Some(&cache)).unwrap();
    // Vandalise the source frames; a cache hit must not notice.
    for path in frames.frames.iter() {
        std::fs::write(path, b"no longer a png").unwrap();
    }
    let second = load_tile_stack(&frames, tile, Some(&cache)).unwrap();
    assert_abs_diff_eq!(second, first);

    // Without the cache the vandalism is fatal.
    assert!(matches!(
        load_tile_stack(&frames, tile, None),
        Err(LoadError::Frame(FrameReadError::Decode { .. }))
    ));
}

#[test]
fn unreadable_frame_fails_the_whole_tile() {
    let tmp = tempfile::tempdir().unwrap();
    let frames = test_frame_set(tmp.path(), 3, 4, 4);
    std::fs::write(frames.frames.last(), b"truncated").unwrap();
    let tile = Tile {
        x0: 0,
        y0: 0,
        x1: 2,
        y1: 2,
    };

    assert!(matches!(
        load_tile_stack(&frames, tile, None),
        Err(LoadError::Frame(FrameReadError::Decode { .. }))
    ));
}
