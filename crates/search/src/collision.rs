// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Chained hash table keyed by sigma-bit projections.

const EMPTY: u32 = u32::MAX;

/// One or two rows of the first half whose projections XOR to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEntry {
    pub first: usize,
    pub second: Option<usize>,
    next: u32,
}

impl CollisionEntry {
    /// Number of rows combined in this entry.
    pub fn rows(&self) -> usize {
        1 + usize::from(self.second.is_some())
    }
}

/// `2^sigma` chain heads pointing into an entry arena.
///
/// The head array is allocated once; [`CollisionTable::clear`] only resets the
/// heads that were used, so clearing costs as much as the inserts did.
#[derive(Debug)]
pub struct CollisionTable {
    heads: Vec<u32>,
    entries: Vec<CollisionEntry>,
    used: Vec<u32>,
}

impl CollisionTable {
    pub fn new(sigma: u32) -> Self {
        Self {
            heads: vec![EMPTY; 1usize << sigma],
            entries: Vec::new(),
            used: Vec::new(),
        }
    }

    pub fn buckets(&self) -> usize {
        self.heads.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes an entry onto the front of the chain for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` has more than sigma bits. At most `u32::MAX - 1` entries
    /// fit between two clears.
    pub fn insert(&mut self, key: u32, first: usize, second: Option<usize>) {
        let slot = key as usize;
        let head = self.heads[slot];
        if head == EMPTY {
            self.used.push(key);
        }
        debug_assert!(self.entries.len() < EMPTY as usize, "entry arena overflow");
        let index = self.entries.len() as u32;
        self.entries.push(CollisionEntry {
            first,
            second,
            next: head,
        });
        self.heads[slot] = index;
    }

    /// Every entry stored under `key`, most recent first.
    pub fn chain(&self, key: u32) -> Chain<'_> {
        Chain {
            table: self,
            cursor: self.heads[key as usize],
        }
    }

    pub fn clear(&mut self) {
        for key in self.used.drain(..) {
            self.heads[key as usize] = EMPTY;
        }
        self.entries.clear();
    }
}

pub struct Chain<'a> {
    table: &'a CollisionTable,
    cursor: u32,
}

impl Iterator for Chain<'_> {
    type Item = CollisionEntry;

    fn next(&mut self) -> Option<CollisionEntry> {
        if self.cursor == EMPTY {
            return None;
        }
        let entry = self.table.entries[self.cursor as usize];
        self.cursor = entry.next;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::CollisionTable;

    #[test]
    fn chains_keep_every_entry() {
        let mut table = CollisionTable::new(3);
        assert_eq!(table.buckets(), 8);
        table.insert(5, 0, None);
        table.insert(5, 1, Some(2));
        table.insert(2, 3, None);

        let chain: Vec<_> = table.chain(5).map(|e| (e.first, e.second)).collect();
        assert_eq!(chain, vec![(1, Some(2)), (0, None)]);
        assert_eq!(table.chain(2).count(), 1);
        assert_eq!(table.chain(0).count(), 0);
        assert_eq!(table.chain(5).next().map(|e| e.rows()), Some(2));
    }

    #[test]
    fn clear_empties_every_used_bucket() {
        let mut table = CollisionTable::new(2);
        table.insert(1, 0, None);
        table.insert(3, 1, None);
        table.clear();
        assert!(table.is_empty());
        assert!((0..4).all(|k| table.chain(k).next().is_none()));
        table.insert(3, 2, None);
        assert_eq!(table.len(), 1);
        assert_eq!(table.chain(3).map(|e| e.first).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn sigma_zero_is_a_single_bucket() {
        let mut table = CollisionTable::new(0);
        table.insert(0, 0, None);
        table.insert(0, 0, Some(1));
        assert_eq!(table.chain(0).count(), 2);
    }
}
