// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Packed bit vectors with a cached Hamming weight.
//!
//! Bits are stored most-significant-bit first in 64-bit words, so bit `0` is the
//! top bit of word `0`. The unused tail of the last word is always zero.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

pub(crate) const WORD_BITS: usize = 64;

/// A fixed-width sequence of bits over GF(2).
///
/// The Hamming weight is cached and kept in sync by every mutation, so
/// [`BitVector::weight`] is O(1). All positions are bit indices; wider groups are
/// read and written with [`BitVector::bits`] and [`BitVector::set_bits`].
///
/// # Example
///
/// ```
/// use lws_gf2::BitVector;
///
/// let mut v = BitVector::zeros(70);
/// v.set(3, true);
/// v.set(69, true);
/// assert_eq!(v.weight(), 2);
///
/// let w = &v ^ &v;
/// assert!(w.is_zero());
/// ```
#[derive(Clone, Debug, Default, Hash)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
    weight: u64,
}

#[inline]
fn locate(index: usize) -> (usize, u64) {
    (
        index / WORD_BITS,
        1u64 << (WORD_BITS - 1 - index % WORD_BITS),
    )
}

impl BitVector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an all-zero vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
            weight: 0,
        }
    }

    /// Creates the unit vector of length `len` with a one at `index`.
    pub fn unit(len: usize, index: usize) -> Self {
        let mut v = Self::zeros(len);
        v.set(index, true);
        v
    }

    /// Builds a vector from bits in order.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut v = Self::new();
        for bit in bits {
            v.push_bit(bit);
        }
        v
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in 64-bit words.
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Number of unused bits at the end of the last word.
    pub fn padding(&self) -> usize {
        self.words.len() * WORD_BITS - self.len
    }

    /// Hamming weight.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Sum of `weights[i]` over every set bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is not exactly as long as the vector.
    pub fn weighted_weight(&self, weights: &[u64]) -> u64 {
        assert_eq!(
            weights.len(),
            self.len,
            "weight vector length must match the bit length"
        );
        self.iter_ones().map(|i| weights[i]).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.weight == 0
    }

    /// Raw words, most-significant-bit first.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    // Every word write goes through here so the cached weight stays exact.
    #[inline]
    fn replace_word(&mut self, index: usize, word: u64) {
        let old = self.words[index];
        self.weight = self.weight - u64::from(old.count_ones()) + u64::from(word.count_ones());
        self.words[index] = word;
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        let (word, mask) = locate(index);
        self.words[word] & mask != 0
    }

    /// Writes the bit at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        let (word, mask) = locate(index);
        let current = self.words[word];
        let updated = if value { current | mask } else { current & !mask };
        if updated != current {
            self.replace_word(word, updated);
        }
    }

    /// Inverts the bit at `index`.
    pub fn flip(&mut self, index: usize) {
        let value = self.get(index);
        self.set(index, !value);
    }

    /// Exchanges the bits at `a` and `b`.
    pub fn swap_bits(&mut self, a: usize, b: usize) {
        let (x, y) = (self.get(a), self.get(b));
        if x != y {
            self.set(a, y);
            self.set(b, x);
        }
    }

    /// Reads `width` bits starting at `start`, right-aligned in the result.
    ///
    /// The bit at `start` becomes the most significant of the `width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `width > 64` or the range runs past the end.
    pub fn bits(&self, start: usize, width: usize) -> u64 {
        assert!(width <= WORD_BITS, "cannot read more than 64 bits at once");
        assert!(
            start + width <= self.len,
            "bit range {start}..{} out of range for length {}",
            start + width,
            self.len
        );
        if width == 0 {
            return 0;
        }
        let word = start / WORD_BITS;
        let offset = start % WORD_BITS;
        let mut value = self.words[word] << offset;
        if offset + width > WORD_BITS {
            value |= self.words[word + 1] >> (WORD_BITS - offset);
        }
        value >> (WORD_BITS - width)
    }

    /// Writes the low `width` bits of `value` starting at `start`.
    pub fn set_bits(&mut self, start: usize, width: usize, value: u64) {
        assert!(width <= WORD_BITS, "cannot write more than 64 bits at once");
        assert!(
            start + width <= self.len,
            "bit range {start}..{} out of range for length {}",
            start + width,
            self.len
        );
        for i in 0..width {
            self.set(start + i, (value >> (width - 1 - i)) & 1 == 1);
        }
    }

    /// Appends one bit.
    pub fn push_bit(&mut self, value: bool) {
        self.push_bits(u64::from(value), 1);
    }

    /// Appends 32 bits, most significant first.
    pub fn push_u32(&mut self, value: u32) {
        self.push_bits(u64::from(value), 32);
    }

    /// Appends 64 bits, most significant first.
    pub fn push_u64(&mut self, value: u64) {
        self.push_bits(value, 64);
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, width: usize) {
        assert!(width <= WORD_BITS, "cannot append more than 64 bits at once");
        if width == 0 {
            return;
        }
        let value = if width == WORD_BITS {
            value
        } else {
            value & ((1u64 << width) - 1)
        };
        let offset = self.len % WORD_BITS;
        if offset == 0 {
            self.words.push(0);
        }
        let free = WORD_BITS - offset;
        let last = self.words.len() - 1;
        if width <= free {
            let word = self.words[last] | (value << (free - width));
            self.replace_word(last, word);
        } else {
            let spill = width - free;
            let word = self.words[last] | (value >> spill);
            self.replace_word(last, word);
            self.words.push(0);
            self.replace_word(last + 1, value << (WORD_BITS - spill));
        }
        self.len += width;
    }

    /// Removes and returns the last bit.
    pub fn pop_bit(&mut self) -> Option<bool> {
        self.pop_bits(1).map(|v| v == 1)
    }

    /// Removes and returns the last 32 bits.
    pub fn pop_u32(&mut self) -> Option<u32> {
        self.pop_bits(32).map(|v| v as u32)
    }

    /// Removes and returns the last 64 bits.
    pub fn pop_u64(&mut self) -> Option<u64> {
        self.pop_bits(64)
    }

    fn pop_bits(&mut self, width: usize) -> Option<u64> {
        if width > self.len {
            return None;
        }
        let start = self.len - width;
        let value = self.bits(start, width);
        self.truncate(start);
        Some(value)
    }

    /// Shortens the vector to `len` bits. Does nothing if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let keep = len.div_ceil(WORD_BITS);
        for word in self.words.drain(keep..) {
            self.weight -= u64::from(word.count_ones());
        }
        self.len = len;
        let padding = self.padding();
        if padding > 0 {
            let last = keep - 1;
            let word = self.words[last] & (!0u64 << padding);
            self.replace_word(last, word);
        }
    }

    /// Removes every bit.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
        self.weight = 0;
    }

    /// Deletes the bit at `index`, moving every later bit down by one position.
    pub fn remove(&mut self, index: usize) -> bool {
        let removed = self.get(index);
        let (first, _) = locate(index);
        let offset = index % WORD_BITS;
        let last = self.words.len() - 1;
        for j in first..=last {
            let current = self.words[j];
            let carry = if j < last { self.words[j + 1] >> (WORD_BITS - 1) } else { 0 };
            let shifted = if j == first {
                let keep = if offset == 0 {
                    0
                } else {
                    !0u64 << (WORD_BITS - offset)
                };
                (current & keep) | ((current << 1) & !keep)
            } else {
                current << 1
            };
            self.replace_word(j, shifted | carry);
        }
        self.len -= 1;
        if self.len % WORD_BITS == 0 {
            // the emptied tail word is zero, so the cached weight is unaffected
            self.words.pop();
        }
        removed
    }

    /// Parity of the bitwise AND with `other` (the GF(2) inner product).
    pub fn dot(&self, other: &BitVector) -> bool {
        assert_eq!(self.len, other.len, "inner product of vectors with different lengths");
        let ones: u32 = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        ones & 1 == 1
    }

    /// Positions of all set bits in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let lead = rest.leading_zeros() as usize;
                rest &= !(1u64 << (WORD_BITS - 1 - lead));
                Some(w * WORD_BITS + lead)
            })
        })
    }

    /// The vector as individual bits.
    pub fn to_bits(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    /// The vector as 32-bit groups; a partial last group is zero-padded on the right.
    pub fn to_u32_words(&self) -> Vec<u32> {
        let groups = self.len.div_ceil(32);
        self.words
            .iter()
            .flat_map(|&w| [(w >> 32) as u32, w as u32])
            .take(groups)
            .collect()
    }

    /// The vector as 64-bit groups; a partial last group is zero-padded on the right.
    pub fn to_u64_words(&self) -> Vec<u64> {
        self.words.clone()
    }
}

impl PartialEq for BitVector {
    /// Comparing vectors of different lengths is a contract violation.
    fn eq(&self, other: &Self) -> bool {
        assert_eq!(
            self.len, other.len,
            "comparing bit vectors of different lengths"
        );
        self.words == other.words
    }
}

impl Eq for BitVector {}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, rhs: &BitVector) {
        assert_eq!(self.len, rhs.len, "xor of bit vectors with different lengths");
        let mut weight = 0u64;
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a ^= *b;
            weight += u64::from(a.count_ones());
        }
        self.weight = weight;
    }
}

impl BitXor<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: &BitVector) -> BitVector {
        let mut out = self.clone();
        out ^= rhs;
        out
    }
}

impl BitXor<&BitVector> for BitVector {
    type Output = BitVector;

    fn bitxor(mut self, rhs: &BitVector) -> BitVector {
        self ^= rhs;
        self
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bits(iter)
    }
}

/// Space-separated `0`/`1` digits.
impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(if self.get(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Space-separated 64-bit words in hex.
impl fmt::LowerHex for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{word:x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BitVector;

    fn popcount(v: &BitVector) -> u64 {
        v.to_bits().iter().filter(|b| **b).count() as u64
    }

    #[test]
    fn push_and_read_back() {
        let mut v = BitVector::new();
        v.push_bit(true);
        v.push_u32(0xdead_beef);
        v.push_bit(false);
        v.push_u64(0x0123_4567_89ab_cdef);
        assert_eq!(v.len(), 98);
        assert_eq!(v.word_len(), 2);
        assert_eq!(v.padding(), 30);
        assert!(v.get(0));
        assert_eq!(v.bits(1, 32), 0xdead_beef);
        assert!(!v.get(33));
        assert_eq!(v.bits(34, 64), 0x0123_4567_89ab_cdef);
        assert_eq!(v.weight(), popcount(&v));
    }

    #[test]
    fn pop_restores_previous_state() {
        let mut v = BitVector::new();
        v.push_u32(0xffff_0000);
        let before = v.clone();
        v.push_u64(u64::MAX);
        assert_eq!(v.pop_u64(), Some(u64::MAX));
        assert_eq!(v, before);
        assert_eq!(v.pop_bit(), Some(false));
        assert_eq!(v.len(), 31);
        assert_eq!(v.weight(), 16);
        assert_eq!(v.pop_u64(), None);
    }

    #[test]
    fn set_and_flip_track_weight() {
        let mut v = BitVector::zeros(130);
        v.set(0, true);
        v.set(64, true);
        v.set(129, true);
        v.set(129, true);
        assert_eq!(v.weight(), 3);
        v.flip(64);
        assert_eq!(v.weight(), 2);
        v.set(0, false);
        assert_eq!(v.weight(), 1);
        assert_eq!(v.iter_ones().collect::<Vec<_>>(), vec![129]);
    }

    #[test]
    fn set_bits_overwrites_range() {
        let mut v = BitVector::zeros(80);
        v.set_bits(60, 8, 0b1010_0110);
        assert_eq!(v.bits(60, 8), 0b1010_0110);
        assert_eq!(v.weight(), 4);
        v.set_bits(60, 8, 0);
        assert!(v.is_zero());
    }

    #[test]
    fn remove_shifts_across_words() {
        let bits: Vec<bool> = (0..130).map(|i| i % 3 == 0).collect();
        let mut v = BitVector::from_bits(bits.clone());
        let removed = v.remove(63);
        assert_eq!(removed, bits[63]);
        let mut expected = bits.clone();
        expected.remove(63);
        assert_eq!(v.to_bits(), expected);
        assert_eq!(v.weight(), popcount(&v));
    }

    #[test]
    fn remove_drops_empty_tail_word() {
        let mut v = BitVector::zeros(65);
        v.set(64, true);
        v.remove(0);
        assert_eq!(v.len(), 64);
        assert_eq!(v.word_len(), 1);
        assert!(v.get(63));
        assert_eq!(v.weight(), 1);
    }

    #[test]
    fn xor_is_self_inverse() {
        let a = BitVector::from_bits((0..100).map(|i| i % 7 == 1));
        let b = BitVector::from_bits((0..100).map(|i| i % 5 == 2));
        let c = &a ^ &b;
        assert_eq!(c.weight(), popcount(&c));
        assert_eq!(&c ^ &b, a);
        assert!((&a ^ &a).is_zero());
    }

    #[test]
    fn weighted_weight_sums_set_positions() {
        let v = BitVector::from_bits([true, false, true, true]);
        assert_eq!(v.weighted_weight(&[5, 100, 2, 1]), 8);
    }

    #[test]
    fn word_exports_are_padded_on_the_right() {
        let mut v = BitVector::new();
        v.push_u32(0x1234_5678);
        v.push_bits(0b11, 2);
        assert_eq!(v.to_u32_words(), vec![0x1234_5678, 0xc000_0000]);
        assert_eq!(v.to_u64_words(), vec![0x1234_5678_c000_0000]);
        assert_eq!(format!("{v:x}"), "12345678c0000000");
    }

    #[test]
    fn display_lists_bits() {
        let v = BitVector::from_bits([true, false, true]);
        assert_eq!(v.to_string(), "1 0 1");
    }

    #[test]
    fn dot_is_parity_of_overlap() {
        let a = BitVector::from_bits([true, true, false, true]);
        let b = BitVector::from_bits([true, false, false, true]);
        assert!(!a.dot(&b));
        let c = BitVector::from_bits([true, false, false, false]);
        assert!(a.dot(&c));
    }

    #[test]
    #[should_panic]
    fn comparing_different_lengths_panics() {
        let _ = BitVector::zeros(3) == BitVector::zeros(4);
    }

    #[test]
    #[should_panic]
    fn reading_past_the_end_panics() {
        BitVector::zeros(10).get(10);
    }
}
