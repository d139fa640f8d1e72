// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lws_gf2::{BitMatrix, BitVector, Permutation};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Parses rows of `0`/`1` characters; spaces are ignored.
pub fn matrix_from_strs(rows: &[&str]) -> BitMatrix {
    let rows = rows
        .iter()
        .map(|row| {
            row.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c == '1')
                .collect::<BitVector>()
        })
        .collect();
    BitMatrix::from_rows(rows).expect("fixture rows must have equal length")
}

/// Systematic generator of the extended Hamming `[8, 4, 4]` code.
pub fn extended_hamming_generator() -> BitMatrix {
    matrix_from_strs(&["1000 1011", "0100 1101", "0010 1110", "0001 0111"])
}

/// Parity-check matrix of the Hamming `[7, 4, 3]` code.
pub fn hamming_parity_check() -> BitMatrix {
    matrix_from_strs(&["1010101", "0110011", "0001111"])
}

/// A full-rank `k × n` generator: `[I | Z]` with random `Z`, columns shuffled.
pub fn random_generator(k: usize, n: usize, seed: u64) -> BitMatrix {
    assert!(k <= n, "dimension must not exceed length");
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut g = BitMatrix::identity(k);
    for i in 0..k {
        for _ in k..n {
            g[i].push_bit(rng.gen_bool(0.5));
        }
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    let perm = Permutation::from_vec(order).expect("shuffled indices form a permutation");
    g.permute_columns(&perm)
}
