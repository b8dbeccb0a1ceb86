// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum UnitParseError {
    #[error("Successfully parsed a '{unit}' unit from '{input}', but couldn't parse the numeric part")]
    GotByteUnitButCantParse { input: String, unit: &'static str },

    #[error("A quantity of memory cannot be negative ('{input}')")]
    Negative { input: String },

    #[error("Couldn't parse '{input}' as a quantity of {unit_type}")]
    Unknown {
        input: String,
        unit_type: &'static str,
    },
}
