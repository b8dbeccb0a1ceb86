// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::Path;

use super::*;

fn write_frame(path: &Path, height: u32, width: u32) {
    let buf: image::ImageBuffer<image::Luma<u16>, Vec<u16>> =
        image::ImageBuffer::from_fn(width, height, |x, y| image::Luma([(500 + x * y) as u16]));
    buf.save(path).unwrap();
}

#[test]
fn arg_file_is_merged_and_cli_args_win() {
    let tmp = tempfile::tempdir().unwrap();
    let arg_file = tmp.path().join("stack.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    writeln!(
        f,
        r#"
source_dir = "/data/session1"
sigma = 2.5
memory_budget = "64MiB"
no_cache = true
"#
    )
    .unwrap();
    drop(f);

    let cli_args = StackArgs {
        args_file: Some(arg_file),
        sigma: Some(3.0),
        ..Default::default()
    };
    let merged = cli_args.merge().unwrap();

    // CLI sigma beats the file's; everything else comes from the file.
    assert_eq!(merged.sigma, Some(3.0));
    assert_eq!(
        merged.source_dir.as_deref(),
        Some(Path::new("/data/session1"))
    );
    assert_eq!(merged.memory_budget.as_deref(), Some("64MiB"));
    assert!(merged.no_cache);
    assert!(merged.args_file.is_none());
}

#[test]
fn unrecognised_arg_file_extension_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let arg_file = tmp.path().join("stack.yaml");
    std::fs::write(&arg_file, "sigma = 1.0").unwrap();

    let result = StackArgs {
        args_file: Some(arg_file),
        ..Default::default()
    }
    .merge();
    assert!(matches!(result, Err(SubstackerError::ArgFile(_))));
}

#[test]
fn parse_builds_params_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    for i in 0..3 {
        write_frame(&tmp.path().join(format!("sub_{i:03}.png")), 8, 8);
    }

    let params = StackArgs {
        source_dir: Some(tmp.path().to_path_buf()),
        ..Default::default()
    }
    .parse()
    .unwrap();

    assert_eq!(params.frames.num_frames(), 3);
    assert_eq!((params.frames.height, params.frames.width), (8, 8));
    // 8x8 frames fit the default budget in a single tile.
    assert_eq!(params.plan.tiles.len(), 1);
    assert_eq!(params.sigma, DEFAULT_SIGMA_MULTIPLIER);
    assert!(params.cache.is_none());
    assert_eq!(params.output, PathBuf::from(DEFAULT_OUTPUT_FILENAME));
    assert!(params.rejection_output.is_none());
}

#[test]
fn non_positive_sigma_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_frame(&tmp.path().join("sub_000.png"), 4, 4);

    let result = StackArgs {
        source_dir: Some(tmp.path().to_path_buf()),
        sigma: Some(0.0),
        ..Default::default()
    }
    .parse();
    assert!(matches!(result, Err(SubstackerError::Generic(_))));
}

#[test]
fn no_cache_beats_a_cache_dir() {
    let tmp = tempfile::tempdir().unwrap();
    for i in 0..3 {
        write_frame(&tmp.path().join(format!("sub_{i:03}.png")), 4, 4);
    }

    let params = StackArgs {
        source_dir: Some(tmp.path().to_path_buf()),
        cache_dir: Some(tmp.path().join("cache")),
        no_cache: true,
        ..Default::default()
    }
    .parse()
    .unwrap();
    assert!(params.cache.is_none());
}
