// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use clap::Parser;
use cli::Cli;

mod check_to_generator;
mod cli;
pub mod helpers;
mod inspect;
mod print_config;
mod search;
mod sha1_me;
mod shorten;

pub fn main() {
    // Execute the cli
    if let Err(err) = Cli::parse().execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
