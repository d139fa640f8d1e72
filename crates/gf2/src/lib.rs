// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Packed linear algebra over GF(2) for binary linear codes.
//!
//! A binary code of length `n` and dimension `k` is described by a `k × n`
//! generator matrix `G`; its codewords are all GF(2) combinations of the rows of
//! `G`. This crate provides the pieces the low-weight search is built from:
//!
//! - [`BitVector`]: packed bits, most significant bit first, with a cached
//!   Hamming weight
//! - [`BitMatrix`]: rows of equally long bit vectors
//! - [`Permutation`]: column permutations and their inverse
//! - [`reduce_to_systematic`], [`shorten`] and [`check_to_generator`]
//!
//! ## Systematic form
//!
//! A `k × n` matrix is systematic when its first `k` columns form the identity.
//! Every full-rank generator can be brought into systematic form by row
//! operations and column swaps; the column swaps are returned so a codeword
//! found in the reduced coordinates can be mapped back to the original code.

pub mod bit_matrix;
pub mod bit_vector;
pub mod elimination;
pub mod errors;
pub mod permutation;

// Re-export commonly used types for convenience
pub use bit_matrix::BitMatrix;
pub use bit_vector::BitVector;
pub use elimination::{check_to_generator, rank, reduce_to_systematic, shorten, verify_parity};
pub use errors::{Gf2Error, Gf2Result};
pub use permutation::Permutation;
