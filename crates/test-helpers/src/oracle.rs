// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lws_gf2::{rank, BitMatrix, BitVector};

/// True if `v` is a GF(2) combination of the rows of `generator`.
pub fn in_row_space(generator: &BitMatrix, v: &BitVector) -> bool {
    let mut extended = generator.clone();
    if extended.push_row(v.clone()).is_err() {
        return false;
    }
    rank(&extended) == rank(generator)
}

/// Smallest weight of a nonzero codeword, by enumerating all `2^k` combinations.
pub fn brute_force_minimum_distance(generator: &BitMatrix) -> u64 {
    let k = generator.rows();
    assert!(k < 24, "exhaustive enumeration is limited to small codes");
    let mut best = u64::MAX;
    for mask in 1u32..(1u32 << k) {
        let mut word = BitVector::zeros(generator.cols());
        for (i, row) in generator.iter().enumerate() {
            if mask & (1 << i) != 0 {
                word ^= row;
            }
        }
        if !word.is_zero() {
            best = best.min(word.weight());
        }
    }
    best
}
