// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Plain-text file formats used by the low-weight search tools.
//!
//! - Matrix files: one row per line, whitespace separated `0`/`1` tokens
//! - Weight files: whitespace separated unsigned integers, one per column
//! - Codeword files: a `%BEGIN` .. `%END` header followed by `weight bits..` records

mod codeword_file;
mod errors;
mod matrix_file;
mod traits;

pub use codeword_file::*;
pub use errors::*;
pub use matrix_file::*;
pub use traits::*;
