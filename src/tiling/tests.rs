// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

/// Every pixel of the plane must be covered by exactly one tile.
fn assert_exact_disjoint_cover(plan: &TilePlan, height: usize, width: usize) {
    let mut covered = vec![0u8; height * width];
    for tile in &plan.tiles {
        assert!(tile.x1 <= width, "{tile} overruns width {width}");
        assert!(tile.y1 <= height, "{tile} overruns height {height}");
        assert!(tile.width() > 0 && tile.height() > 0, "{tile} is degenerate");
        for y in tile.y0..tile.y1 {
            for x in tile.x0..tile.x1 {
                covered[y * width + x] += 1;
            }
        }
    }
    assert!(
        covered.iter().all(|&c| c == 1),
        "plane not exactly covered: {plan:?}"
    );
}

#[test]
fn single_tile_when_budget_is_generous() {
    let plan = TilePlan::new(10, 100, 200, u64::MAX / 2).unwrap();
    assert_eq!(plan.tiles.len(), 1);
    assert_eq!(
        plan.tiles[0],
        Tile {
            x0: 0,
            y0: 0,
            x1: 200,
            y1: 100
        }
    );
    assert_exact_disjoint_cover(&plan, 100, 200);
}

#[test]
fn tiles_exactly_cover_the_plane() {
    for &(num_frames, height, width, budget) in &[
        (4, 32, 48, 4096_u64),
        (16, 100, 100, 65536),
        (3, 17, 31, 1000),
        (100, 64, 64, 3200),
        (1, 1, 1, 4),
        (7, 2048, 1536, 1 << 20),
    ] {
        let plan = TilePlan::new(num_frames, height, width, budget)
            .unwrap_or_else(|e| panic!("({num_frames},{height},{width},{budget}): {e}"));
        assert_exact_disjoint_cover(&plan, height, width);
        assert_eq!(plan.tiles.len(), plan.num_x * plan.num_y);
    }
}

#[test]
fn nominal_tiles_respect_the_budget() {
    let num_frames = 8;
    let budget = 10_000_u64;
    let plan = TilePlan::new(num_frames, 500, 700, budget).unwrap();
    // All but the last tile in each axis have the nominal dimensions, and a
    // nominal tile stack fits the budget.
    let nominal_stack_bytes =
        (plan.tile_width * plan.tile_height * num_frames * BYTES_PER_SAMPLE) as u64;
    assert!(nominal_stack_bytes <= budget);
    assert!(plan.tiles.len() > 1);
}

#[test]
fn last_tiles_take_the_remainder() {
    // 4 frames, 16 B per pixel position; 4096 B buys 256 pixels, side 16.
    // Width 50 -> 4 tiles across of nominal width 12, last one 14 wide.
    let plan = TilePlan::new(4, 16, 50, 4096).unwrap();
    assert_eq!(plan.num_x, 4);
    assert_eq!(plan.tile_width, 12);
    let last = plan.tiles.last().unwrap();
    assert_eq!(last.x0, 36);
    assert_eq!(last.x1, 50);
    assert_exact_disjoint_cover(&plan, 16, 50);
}

#[test]
fn budget_too_small_is_a_config_error() {
    // 8 frames * 4 B = 32 B for a single pixel position; 16 B can't hold it.
    let result = TilePlan::new(8, 100, 100, 16);
    assert!(matches!(result, Err(TilingError::BudgetTooSmall { .. })));

    // The exact boundary is fine.
    let plan = TilePlan::new(8, 100, 100, 32).unwrap();
    assert_exact_disjoint_cover(&plan, 100, 100);
}

#[test]
fn degenerate_inputs_are_errors() {
    assert!(matches!(
        TilePlan::new(0, 10, 10, 1024),
        Err(TilingError::NoFrames)
    ));
    assert!(matches!(
        TilePlan::new(4, 0, 10, 1024),
        Err(TilingError::EmptyPlane { .. })
    ));
}
