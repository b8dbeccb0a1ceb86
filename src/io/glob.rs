// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::PathBuf;

use glob::glob;
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem, sorted
/// lexicographically. A frame's index in the stack is its position in this
/// sorted order.
pub fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    entries.sort_unstable();
    Ok(entries)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_finds_and_sorts() {
        let entries = get_all_matches_from_glob("src/io/*.rs").unwrap();
        assert!(entries.contains(&PathBuf::from("src/io/glob.rs")));
        assert!(entries.contains(&PathBuf::from("src/io/mod.rs")));
        let mut resorted = entries.clone();
        resorted.sort_unstable();
        assert_eq!(entries, resorted);
    }

    #[test]
    fn no_matches_is_empty_not_an_error() {
        let entries = get_all_matches_from_glob("src/io/*.nonexistent").unwrap();
        assert!(entries.is_empty());
    }
}
