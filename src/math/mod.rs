// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper statistics.


/// The median of a sample. The slice is used as scratch space and is sorted
/// in place. An even-length sample averages the two central values.
///
/// The slice must not be empty.
pub(crate) fn median(values: &mut [f32]) -> f32 {
    debug_assert!(!values.is_empty());
    values.sort_unstable_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// The sample standard deviation (N-1 denominator, as MATLAB's `std` or
/// numpy's `std(ddof=1)`). A single sample carries no dispersion information,
/// so it gets 0.
pub(crate) fn sample_std(values: &[f32]) -> f32 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n as f64;
    let sum_sq = values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>();
    (sum_sq / (n - 1) as f64).sqrt() as f32
}
