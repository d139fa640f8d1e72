// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Column permutations.

use crate::errors::{Gf2Error, Gf2Result};
use crate::BitVector;

/// A bijection on column positions.
///
/// Entry `i` names the source column that was moved into position `i`, so
/// [`Permutation::apply`] computes `out[i] = v[perm[i]]` and
/// [`Permutation::unapply`] maps a permuted vector back with `out[perm[i]] = v[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Wraps an explicit index list after checking it is a bijection.
    pub fn from_vec(indices: Vec<usize>) -> Gf2Result<Self> {
        let mut seen = vec![false; indices.len()];
        for &i in &indices {
            if i >= indices.len() || seen[i] {
                return Err(Gf2Error::invalid_columns(format!(
                    "{i} breaks the permutation of {} columns",
                    indices.len()
                )));
            }
            seen[i] = true;
        }
        Ok(Self(indices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Source column of position `index`.
    pub fn get(&self, index: usize) -> usize {
        self.0[index]
    }

    /// Records that positions `a` and `b` were exchanged.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (position, &source) in self.0.iter().enumerate() {
            inverse[source] = position;
        }
        Self(inverse)
    }

    pub fn apply(&self, v: &BitVector) -> BitVector {
        assert_eq!(v.len(), self.len(), "permutation length mismatch");
        self.0.iter().map(|&source| v.get(source)).collect()
    }

    pub fn unapply(&self, v: &BitVector) -> BitVector {
        assert_eq!(v.len(), self.len(), "permutation length mismatch");
        let mut out = BitVector::zeros(v.len());
        for i in v.iter_ones() {
            out.set(self.0[i], true);
        }
        out
    }

    /// Rearranges per-column values the same way [`Permutation::apply`] rearranges bits.
    pub fn apply_to_slice<T: Copy>(&self, values: &[T]) -> Vec<T> {
        assert_eq!(values.len(), self.len(), "permutation length mismatch");
        self.0.iter().map(|&source| values[source]).collect()
    }
}
