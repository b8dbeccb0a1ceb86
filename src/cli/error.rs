// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all substacker-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::stack::StackArgsError;
use crate::{
    cache::CacheError,
    context::FrameSetError,
    io::{read::FrameReadError, write::ImageWriteError, GlobError},
    loader::LoadError,
    params::StackError,
    tiling::TilingError,
    unit_parsing::UnitParseError,
};

/// The *only* publicly visible error from substacker.
#[derive(Error, Debug)]
pub enum SubstackerError {
    /// An error related to discovering or reading input frames.
    #[error("{0}")]
    Frames(String),

    /// An error related to the memory budget or the tile plan.
    #[error("{0}")]
    Tiling(String),

    /// An error related to the tile cache.
    #[error("{0}")]
    Cache(String),

    /// An error related to writing output images.
    #[error("{0}")]
    Output(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<StackArgsError> for SubstackerError {
    fn from(e: StackArgsError) -> Self {
        match e {
            StackArgsError::SigmaNotPositive { .. } => Self::Generic(e.to_string()),
            StackArgsError::Frames(e) => Self::from(e),
            StackArgsError::UnitParse(e) => Self::from(e),
            StackArgsError::Tiling(e) => Self::from(e),
            StackArgsError::Cache(e) => Self::from(e),
        }
    }
}

impl From<StackError> for SubstackerError {
    fn from(e: StackError) -> Self {
        match e {
            StackError::Load(e) => Self::from(e),
            StackError::Write(e) => Self::from(e),
        }
    }
}

impl From<LoadError> for SubstackerError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Frame(e) => Self::from(e),
            LoadError::Cache(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<FrameSetError> for SubstackerError {
    fn from(e: FrameSetError) -> Self {
        match e {
            FrameSetError::NoInput | FrameSetError::NoFrames { .. } => {
                Self::Frames(e.to_string())
            }
            FrameSetError::Glob(e) => Self::from(e),
            FrameSetError::Frame(e) => Self::from(e),
        }
    }
}

impl From<FrameReadError> for SubstackerError {
    fn from(e: FrameReadError) -> Self {
        Self::Frames(e.to_string())
    }
}

impl From<GlobError> for SubstackerError {
    fn from(e: GlobError) -> Self {
        Self::Frames(e.to_string())
    }
}

impl From<TilingError> for SubstackerError {
    fn from(e: TilingError) -> Self {
        Self::Tiling(e.to_string())
    }
}

impl From<UnitParseError> for SubstackerError {
    fn from(e: UnitParseError) -> Self {
        Self::Tiling(e.to_string())
    }
}

impl From<CacheError> for SubstackerError {
    fn from(e: CacheError) -> Self {
        Self::Cache(e.to_string())
    }
}

impl From<ImageWriteError> for SubstackerError {
    fn from(e: ImageWriteError) -> Self {
        Self::Output(e.to_string())
    }
}

impl From<std::io::Error> for SubstackerError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
