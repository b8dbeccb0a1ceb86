// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Out-of-core, sigma-clipped stacking of astrophotography sub-frames.
 */

pub mod assemble;
pub mod cache;
mod cli;
pub mod constants;
pub mod context;
pub mod io;
pub mod loader;
pub(crate) mod math;
mod messages;
pub(crate) mod params;
pub mod reduce;
pub mod tiling;
pub(crate) mod unit_parsing;

// Re-exports.
pub use cli::{Substacker, SubstackerError};

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be changed by the CLI
/// code, before any serious work starts.
static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
