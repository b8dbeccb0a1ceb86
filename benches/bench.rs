// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;
use ndarray::Array3;

use substacker::reduce::reduce_stack;

fn reduction(c: &mut Criterion) {
    // A realistic tile stack: mostly flat background with a sprinkling of
    // cosmic-ray-like outliers.
    let stack = Array3::from_shape_fn((16, 128, 128), |(f, y, x)| {
        let base = 1000.0 + (y * 128 + x) as f32 * 0.01;
        if (f * 7919 + y * 131 + x * 17) % 997 == 0 {
            base * 40.0
        } else {
            base
        }
    });

    c.bench_function("reduce 16x128x128 tile stack", |b| {
        b.iter(|| reduce_stack(stack.view(), 1.0))
    });
}

criterion_group!(benches, reduction);
criterion_main!(benches);
