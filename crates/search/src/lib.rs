// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Low-weight codeword search after Canteaut and Chabaud.
//!
//! Given a `k × n` generator matrix, the search brings it to systematic form
//! `[I | Z]` and splits the rows into two halves. Each iteration projects the
//! rows of `Z` onto a random set of `sigma` columns, stores every single row and
//! pair of rows of the first half in a [`CollisionTable`] keyed by that
//! projection, and looks up every single row and pair of the second half. A
//! collision means the combined rows vanish on the chosen columns, so their sum
//! is likely to be light. Between iterations one random pivot step
//! (Delta-Gauss) changes the information set.
//!
//! The best codeword found is mapped back to the caller's column order and
//! streamed to a [`ResultLog`].

mod collision;
mod engine;
mod errors;
mod params;
mod random;
mod result_log;

pub use collision::{Chain, CollisionEntry, CollisionTable};
pub use engine::{CheckFn, LowWeightSearch, SearchOutcome};
pub use errors::{SearchError, SearchResult};
pub use params::{SearchParams, MAX_SIGMA};
pub use random::RandomSource;
pub use result_log::ResultLog;

// Static matrix utilities used alongside the search
pub use lws_gf2::{check_to_generator, shorten};
