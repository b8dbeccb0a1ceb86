// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

#[test]
fn naked_numbers_are_bytes() {
    assert_eq!(parse_bytes("4096").unwrap(), 4096);
    assert_eq!(parse_bytes(" 12 ").unwrap(), 12);
}

#[test]
fn si_and_binary_units() {
    assert_eq!(parse_bytes("4kB").unwrap(), 4000);
    assert_eq!(parse_bytes("4KiB").unwrap(), 4096);
    assert_eq!(parse_bytes("512MiB").unwrap(), 512 * 1024 * 1024);
    assert_eq!(parse_bytes("1.5GB").unwrap(), 1_500_000_000);
    // Unit casing is forgiving.
    assert_eq!(parse_bytes("2mib").unwrap(), 2 * 1024 * 1024);
}

#[test]
fn bad_inputs_are_errors() {
    assert!(matches!(
        parse_bytes("12 parsecs"),
        Err(UnitParseError::Unknown { .. })
    ));
    assert!(matches!(
        parse_bytes("-1MiB"),
        Err(UnitParseError::Unknown { .. })
    ));
    assert!(matches!(
        parse_bytes("-1"),
        Err(UnitParseError::Negative { .. })
    ));
}
