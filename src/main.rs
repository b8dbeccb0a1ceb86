// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The main substacker binary.

use clap::Parser;

use substacker::Substacker;

fn main() {
    // Parse the CLI args, run the specified subcommand, and report the only
    // publicly-visible error type if anything goes wrong.
    match Substacker::parse().run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
