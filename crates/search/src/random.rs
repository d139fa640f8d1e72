// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lws_gf2::Permutation;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::{rand_core::OsRng, ChaCha20Rng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Seeded source of uniform integers and index samples.
///
/// The seed is kept so a run can be repeated with [`RandomSource::from_seed`].
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: ChaCha20Rng,
}

impl RandomSource {
    /// Seeds from the operating system, falling back to the wall clock.
    pub fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        let seed = match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                warn!("OS entropy unavailable ({e}), seeding from the clock");
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            }
        };
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: u64) -> Self {
        debug!(seed, "seeding random source");
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn uniform(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// `count` distinct integers from the closed range `[lb, ub]`, in draw order.
    ///
    /// Every ordered selection is equally likely. If `count` exceeds the range
    /// all of its values are returned; an empty range yields nothing.
    pub fn sample_without_replacement(&mut self, lb: usize, ub: usize, count: usize) -> Vec<usize> {
        if lb > ub {
            return Vec::new();
        }
        let mut candidates: Vec<usize> = (lb..=ub).collect();
        let count = count.min(candidates.len());
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let j = self.rng.gen_range(0..candidates.len());
            picked.push(candidates.swap_remove(j));
        }
        picked
    }

    /// A uniformly random permutation of `n` columns.
    pub fn shuffle_permutation(&mut self, n: usize) -> Permutation {
        let order = if n == 0 {
            Vec::new()
        } else {
            self.sample_without_replacement(0, n - 1, n)
        };
        Permutation::from_vec(order).unwrap_or_else(|_| Permutation::identity(n))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
