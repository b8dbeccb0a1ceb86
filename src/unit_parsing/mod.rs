// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;
#[cfg(test)]
mod tests;

pub(crate) use error::UnitParseError;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub(crate) enum ByteFormat {
    /// Bytes
    B,

    /// Kilobytes (1000 B)
    kB,

    /// Megabytes (1000^2 B)
    MB,

    /// Gigabytes (1000^3 B)
    GB,

    /// Kibibytes (1024 B)
    KiB,

    /// Mebibytes (1024^2 B)
    MiB,

    /// Gibibytes (1024^3 B)
    GiB,

    NoUnit,
}

impl ByteFormat {
    fn multiplier(self) -> f64 {
        match self {
            ByteFormat::B | ByteFormat::NoUnit => 1.0,
            ByteFormat::kB => 1e3,
            ByteFormat::MB => 1e6,
            ByteFormat::GB => 1e9,
            ByteFormat::KiB => 1024.0,
            ByteFormat::MiB => 1024.0 * 1024.0,
            ByteFormat::GiB => 1024.0 * 1024.0 * 1024.0,
        }
    }
}

/// Parse a string that may have a unit of bytes attached to it. A naked
/// number is taken as bytes. Returns the quantity in bytes.
pub(crate) fn parse_bytes(s: &str) -> Result<u64, UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return to_bytes(number, ByteFormat::NoUnit, s);
    };

    // That didn't work; let's search over our supported formats.
    for byte_format in ByteFormat::iter().filter(|&bf| bf != ByteFormat::NoUnit) {
        let byte_format_str: &'static str = byte_format.into();
        let suffix = s
            .trim()
            .trim_start_matches(|c| char::is_numeric(c) || c == '.')
            .trim();
        if suffix.to_uppercase() == byte_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotByteUnitButCantParse {
                        input: s.to_string(),
                        unit: byte_format_str,
                    })
                }
            };
            return to_bytes(number, byte_format, s);
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "bytes",
    })
}

fn to_bytes(number: f64, format: ByteFormat, input: &str) -> Result<u64, UnitParseError> {
    if number < 0.0 {
        return Err(UnitParseError::Negative {
            input: input.to_string(),
        });
    }
    Ok((number * format.multiplier()).round() as u64)
}
