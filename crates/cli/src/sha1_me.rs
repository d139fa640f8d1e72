// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Generator of the linear code spanned by the SHA-1 message expansion.
//!
//! Each of the 512 message bits becomes one row: the message with only that
//! bit set, expanded to `words` 32-bit words and concatenated. The code is
//! systematic because the first 16 expanded words are the message itself.

use std::path::Path;

use anyhow::{bail, Result};
use lws_fs::write_matrix;
use lws_gf2::{BitMatrix, BitVector};
use lws_search::shorten;
use tracing::info;

pub const MESSAGE_WORDS: usize = 16;
pub const EXPANDED_WORDS: usize = 60;

/// Expands `w[0..16]` in place: `w[j] = ROTL1(w[j-3] ^ w[j-8] ^ w[j-14] ^ w[j-16])`.
pub fn expand(w: &mut [u32]) {
    for j in MESSAGE_WORDS..w.len() {
        w[j] = (w[j - 3] ^ w[j - 8] ^ w[j - 14] ^ w[j - 16]).rotate_left(1);
    }
}

pub fn generator(words: usize) -> Result<BitMatrix> {
    if words < MESSAGE_WORDS {
        bail!("the expansion needs at least {MESSAGE_WORDS} words, got {words}");
    }
    let rows = MESSAGE_WORDS * 32;
    let matrix = BitMatrix::build(rows, |i| {
        let mut w = vec![0u32; words];
        w[i / 32] = 0x8000_0000 >> (i % 32);
        expand(&mut w);
        let mut row = BitVector::new();
        for word in w {
            row.push_u32(word);
        }
        row
    })?;
    Ok(matrix)
}

pub fn execute(words: usize, output: &Path, zero_last_word: bool) -> Result<()> {
    let mut matrix = generator(words)?;
    if zero_last_word {
        let last: Vec<usize> = (matrix.cols() - 32..matrix.cols()).collect();
        matrix = shorten(&matrix, &last)?;
    }
    write_matrix(output, &matrix)?;
    info!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        path = %output.display(),
        "Wrote SHA-1 message expansion code"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute, expand, generator};
    use lws_fs::read_matrix;

    #[test]
    fn expansion_rotates_the_xor_left() {
        let mut w = [0u32; 20];
        w[0] = 0x8000_0000;
        expand(&mut w);
        assert_eq!(w[16], 1);
        // w[19] = ROTL(w16 ^ w11 ^ w5 ^ w3) = ROTL(1)
        assert_eq!(w[19], 2);
        assert_eq!(w[17], 0);
    }

    #[test]
    fn generator_is_systematic_over_the_message() {
        let g = generator(20).unwrap();
        assert_eq!((g.rows(), g.cols()), (512, 640));
        assert!(g.is_systematic());
        // first message bit feeds the low bit of word 16
        assert_eq!(g.row(0).bits(16 * 32, 32), 1);
    }

    #[test]
    fn too_few_words_is_an_error() {
        assert!(generator(15).is_err());
    }

    #[test]
    fn last_word_can_be_forced_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sha1me.cm");
        execute(20, &output, true).unwrap();
        let g = read_matrix(&output).unwrap();
        assert_eq!((g.rows(), g.cols()), (480, 608));
    }
}
