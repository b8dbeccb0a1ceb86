// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors that can occur during a stacking run.

use thiserror::Error;

use crate::io::write::ImageWriteError;
use crate::loader::LoadError;

#[derive(Error, Debug)]
pub(crate) enum StackError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Write(#[from] ImageWriteError),
}
