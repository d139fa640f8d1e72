// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Row-major bit matrices with dimension validation.

use crate::errors::{Gf2Error, Gf2Result};
use crate::{BitVector, Permutation};
use std::fmt;
use std::ops::{Index, IndexMut};

/// An ordered list of equally long [`BitVector`] rows.
///
/// Rows are the code dimension and columns the code length. Row XOR, the
/// dominant operation during elimination, costs one pass over the packed words.
///
/// # Example
///
/// ```
/// use lws_gf2::{BitMatrix, BitVector};
///
/// let mut m = BitMatrix::new();
/// m.push_row(BitVector::from_bits([true, false, true])).unwrap();
/// m.push_row(BitVector::from_bits([false, true, true])).unwrap();
/// assert!(m.push_row(BitVector::zeros(4)).is_err());
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.cols(), 3);
/// assert!(m.is_systematic());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitMatrix {
    data: Vec<BitVector>,
}

impl BitMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero matrix of the specified dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![BitVector::zeros(cols); rows],
        }
    }

    /// The `size` × `size` identity matrix.
    pub fn identity(size: usize) -> Self {
        Self {
            data: (0..size).map(|i| BitVector::unit(size, i)).collect(),
        }
    }

    /// Creates a matrix from rows, validating that they all have the same length.
    pub fn from_rows(rows: Vec<BitVector>) -> Gf2Result<Self> {
        let mut matrix = Self::new();
        for row in rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Builds a matrix with `rows` rows by calling `build` once per row index.
    pub fn build<F>(rows: usize, mut build: F) -> Gf2Result<Self>
    where
        F: FnMut(usize) -> BitVector,
    {
        let mut matrix = Self::new();
        for i in 0..rows {
            matrix.push_row(build(i))?;
        }
        Ok(matrix)
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`Gf2Error::LengthMismatch`] and leaves the matrix untouched if the
    /// row length differs from the existing rows.
    pub fn push_row(&mut self, row: BitVector) -> Gf2Result<()> {
        if let Some(first) = self.data.first() {
            if first.len() != row.len() {
                return Err(Gf2Error::LengthMismatch {
                    expected: first.len(),
                    actual: row.len(),
                });
            }
        }
        self.data.push(row);
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Number of columns in bits.
    pub fn cols(&self) -> usize {
        self.data.first().map_or(0, BitVector::len)
    }

    /// Number of columns in 64-bit words.
    pub fn cols_u64(&self) -> usize {
        self.data.first().map_or(0, BitVector::word_len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, index: usize) -> &BitVector {
        &self.data[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BitVector> {
        self.data.iter()
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row].get(col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row].set(col, value);
    }

    /// Copies the given rows and columns; the list order sets the output order.
    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Self {
        Self {
            data: rows
                .iter()
                .map(|&r| cols.iter().map(|&c| self.data[r].get(c)).collect())
                .collect(),
        }
    }

    pub fn delete_row(&mut self, index: usize) -> BitVector {
        assert!(index < self.data.len(), "row {index} out of range");
        self.data.remove(index)
    }

    /// Removes column `col` from every row; later columns move down by one.
    pub fn delete_column(&mut self, col: usize) {
        assert!(col < self.cols(), "column {col} out of range");
        for row in &mut self.data {
            row.remove(col);
        }
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    pub fn swap_columns(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for row in &mut self.data {
            row.swap_bits(a, b);
        }
    }

    /// Adds row `src` to row `dst` over GF(2).
    pub fn xor_rows(&mut self, dst: usize, src: usize) {
        assert_ne!(dst, src, "a row cannot be added to itself in place");
        let (target, source) = if dst < src {
            let (low, high) = self.data.split_at_mut(src);
            (&mut low[dst], &high[0])
        } else {
            let (low, high) = self.data.split_at_mut(dst);
            (&mut high[0], &low[src])
        };
        *target ^= source;
    }

    /// True if the first `rows()` columns are the identity matrix.
    pub fn is_systematic(&self) -> bool {
        let k = self.rows();
        if k > self.cols() {
            return false;
        }
        self.data
            .iter()
            .enumerate()
            .all(|(i, row)| (0..k).all(|j| row.get(j) == (i == j)))
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols(), self.rows());
        for (i, row) in self.data.iter().enumerate() {
            for j in row.iter_ones() {
                out.data[j].set(i, true);
            }
        }
        out
    }

    /// New matrix whose column `i` is column `perm[i]` of this one.
    pub fn permute_columns(&self, perm: &Permutation) -> Self {
        Self {
            data: self.data.iter().map(|row| perm.apply(row)).collect(),
        }
    }

    /// Undoes [`BitMatrix::permute_columns`].
    pub fn unpermute_columns(&self, perm: &Permutation) -> Self {
        Self {
            data: self.data.iter().map(|row| perm.unapply(row)).collect(),
        }
    }

    /// Index and weight of the lightest row, first one on ties.
    ///
    /// With `weights`, a row weighs the sum of the weights of its set columns.
    pub fn min_weight_row(&self, weights: Option<&[u64]>) -> Option<(usize, u64)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, row)| match weights {
                Some(w) => (i, row.weighted_weight(w)),
                None => (i, row.weight()),
            })
            .min_by_key(|&(_, weight)| weight)
    }

    /// True if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(BitVector::is_zero)
    }
}

impl Index<usize> for BitMatrix {
    type Output = BitVector;

    fn index(&self, index: usize) -> &BitVector {
        &self.data[index]
    }
}

impl IndexMut<usize> for BitMatrix {
    fn index_mut(&mut self, index: usize) -> &mut BitVector {
        &mut self.data[index]
    }
}

impl<'a> IntoIterator for &'a BitMatrix {
    type Item = &'a BitVector;
    type IntoIter = std::slice::Iter<'a, BitVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl From<BitMatrix> for Vec<BitVector> {
    fn from(matrix: BitMatrix) -> Self {
        matrix.data
    }
}

/// One row per line, bits separated by spaces.
impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
