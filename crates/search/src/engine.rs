// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::collision::{CollisionEntry, CollisionTable};
use crate::{RandomSource, ResultLog, SearchError, SearchParams, SearchResult};
use lws_fs::Header;
use lws_gf2::{reduce_to_systematic, BitMatrix, BitVector, Permutation};
use tracing::{debug, info, warn};

/// Predicate deciding whether a candidate codeword may be kept.
pub type CheckFn = Box<dyn FnMut(&BitVector) -> bool>;

/// Result of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Lightest accepted codeword, in the caller's column order
    pub codeword: BitVector,
    /// Its weight, weighted if a weight vector is set
    pub weight: u64,
    /// Iterations started before the search stopped
    pub iterations: u64,
    /// No collision was accepted and the lightest generator row was returned
    pub fallback: bool,
}

/// The column permutations taking caller coordinates to working coordinates,
/// in the order they were applied.
struct Coordinates {
    random: Permutation,
    gauss: Permutation,
    delta: Permutation,
}

impl Coordinates {
    fn restore(&self, working: &BitVector) -> BitVector {
        let v = self.delta.unapply(working);
        self.restore_systematic(&v)
    }

    /// For vectors in the coordinates of the reduced generator, before any Delta-Gauss step.
    fn restore_systematic(&self, v: &BitVector) -> BitVector {
        let v = self.gauss.unapply(v);
        self.random.unapply(&v)
    }
}

/// Per-call search state.
struct Session {
    k: usize,
    z: BitMatrix,
    coords: Coordinates,
    working_weights: Option<Vec<u64>>,
    best: Option<(u64, BitVector)>,
    improved: bool,
}

impl Session {
    fn codeword(&self, rows: &[usize], z_sum: &BitVector) -> BitVector {
        let mut full = BitVector::zeros(self.k + z_sum.len());
        for &row in rows {
            full.set(row, true);
        }
        for col in z_sum.iter_ones() {
            full.set(self.k + col, true);
        }
        self.coords.restore(&full)
    }

    fn candidate_weight(&self, rows: &[usize], z_sum: &BitVector) -> u64 {
        match &self.working_weights {
            None => rows.len() as u64 + z_sum.weight(),
            Some(w) => {
                rows.iter().map(|&r| w[r]).sum::<u64>()
                    + z_sum.iter_ones().map(|c| w[self.k + c]).sum::<u64>()
            }
        }
    }
}

fn project(row: &BitVector, subset: &[usize]) -> u32 {
    subset
        .iter()
        .fold(0u32, |key, &col| (key << 1) | u32::from(row.get(col)))
}

/// Row and column of the `target`-th one of `z` in row-major order.
fn nth_one(z: &BitMatrix, mut target: usize) -> Option<(usize, usize)> {
    for (i, row) in z.iter().enumerate() {
        let ones = row.weight() as usize;
        if target < ones {
            return row.iter_ones().nth(target).map(|col| (i, col));
        }
        target -= ones;
    }
    None
}

/// Canteaut-Chabaud search for low-weight codewords.
///
/// A session owns its random source and keeps the optional weight vector and
/// check predicate across calls. Everything else is reset by
/// [`LowWeightSearch::canteaut_chabaud`].
///
/// ```no_run
/// use lws_gf2::{BitMatrix, BitVector};
/// use lws_search::{LowWeightSearch, SearchParams};
///
/// let generator = BitMatrix::from_rows(vec![
///     BitVector::from_bits([true, false, true, true]),
///     BitVector::from_bits([false, true, true, false]),
/// ])
/// .unwrap();
/// let mut log = Vec::new();
/// let mut search = LowWeightSearch::with_seed(1);
/// let outcome = search
///     .canteaut_chabaud(&generator, &SearchParams::default(), &mut log)
///     .unwrap();
/// assert!(outcome.weight > 0);
/// ```
pub struct LowWeightSearch {
    rng: RandomSource,
    weights: Option<Vec<u64>>,
    check: Option<CheckFn>,
    combined_rows: Vec<usize>,
    gauss_combinations: BitMatrix,
    information: String,
}

impl Default for LowWeightSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LowWeightSearch {
    pub fn new() -> Self {
        Self::with_random_source(RandomSource::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_random_source(RandomSource::from_seed(seed))
    }

    pub fn with_random_source(rng: RandomSource) -> Self {
        Self {
            rng,
            weights: None,
            check: None,
            combined_rows: Vec::new(),
            gauss_combinations: BitMatrix::new(),
            information: String::new(),
        }
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Per-column weights in the caller's column order.
    pub fn weights(&self) -> Option<&[u64]> {
        self.weights.as_deref()
    }

    pub fn set_weights(&mut self, weights: Vec<u64>) {
        self.weights = Some(weights);
    }

    pub fn clear_weights(&mut self) {
        self.weights = None;
    }

    /// Only candidates for which `check` returns true are kept.
    pub fn set_check<F>(&mut self, check: F)
    where
        F: FnMut(&BitVector) -> bool + 'static,
    {
        self.check = Some(Box::new(check));
    }

    pub fn clear_check(&mut self) {
        self.check = None;
    }

    /// Rows of the working systematic generator that formed the last kept codeword.
    pub fn combined_rows(&self) -> &[usize] {
        &self.combined_rows
    }

    /// Row `i` marks the input rows (after the random column permutation) whose
    /// sum is row `i` of the current working generator.
    pub fn gauss_combinations(&self) -> &BitMatrix {
        &self.gauss_combinations
    }

    /// Adds a line to the info text of [`LowWeightSearch::result_header`].
    pub fn add_information(&mut self, text: impl AsRef<str>) {
        if !self.information.is_empty() {
            self.information.push(' ');
        }
        self.information.push_str(text.as_ref());
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    /// Header for a result file written by a search with `params`.
    pub fn result_header(&self, params: &SearchParams) -> Header {
        Header::new(self.information.clone())
            .with_integer("sigma", u64::from(params.sigma))
            .with_integer("iterations", params.iterations)
            .with_integer("minimum", params.minimum_weight)
            .with_integer("permute_columns", u64::from(params.permute_columns))
            .with_integer("progress", u64::from(params.progress))
            .with_integer("seed", self.rng.seed())
    }

    /// Shuffles the columns of `matrix` in place and returns the permutation used.
    pub fn random_permute_columns(&mut self, matrix: &mut BitMatrix) -> Permutation {
        let perm = self.rng.shuffle_permutation(matrix.cols());
        *matrix = matrix.permute_columns(&perm);
        perm
    }

    fn true_weight(&self, codeword: &BitVector) -> u64 {
        match &self.weights {
            Some(w) => codeword.weighted_weight(w),
            None => codeword.weight(),
        }
    }

    /// Searches the row space of `generator` for a light nonzero codeword.
    ///
    /// Every improvement accepted along the way is appended to `log`. If no
    /// collision is ever accepted the lightest row of the reduced generator is
    /// returned (and logged) instead.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidParameter`] if sigma exceeds 30
    /// - [`SearchError::InvalidInput`] for an empty generator or a weight
    ///   vector of the wrong length
    /// - [`SearchError::Gf2`] if the generator does not have full row rank
    /// - [`SearchError::Log`] if the result log fails
    pub fn canteaut_chabaud<L>(
        &mut self,
        generator: &BitMatrix,
        params: &SearchParams,
        log: &mut L,
    ) -> SearchResult<SearchOutcome>
    where
        L: ResultLog + ?Sized,
    {
        params.validate()?;
        let k = generator.rows();
        let n = generator.cols();
        if k == 0 || n == 0 {
            return Err(SearchError::invalid_input(format!(
                "code dimension ({k}) and length ({n}) must both be nonzero"
            )));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != n {
                return Err(SearchError::invalid_input(format!(
                    "weight vector has {} entries for a code of length {n}",
                    weights.len()
                )));
            }
        }

        info!(dimension = k, length = n, "Starting low-weight search");
        self.combined_rows.clear();
        self.gauss_combinations = BitMatrix::identity(k);

        let mut working = generator.clone();
        let random = if params.permute_columns {
            self.random_permute_columns(&mut working)
        } else {
            Permutation::identity(n)
        };
        let gauss = if working.is_systematic() {
            info!("Generator matrix is systematic");
            Permutation::identity(n)
        } else {
            info!("Generator matrix is not systematic");
            reduce_to_systematic(&mut working, Some(&mut self.gauss_combinations))?
        };

        let redundancy = n - k;
        let mut sigma = params.sigma as usize;
        if sigma > redundancy {
            warn!(
                sigma,
                redundancy, "sigma exceeds the number of redundancy columns, clamping"
            );
            sigma = redundancy;
        }

        let all_rows: Vec<usize> = (0..k).collect();
        let z_cols: Vec<usize> = (k..n).collect();
        let coords = Coordinates {
            random,
            gauss,
            delta: Permutation::identity(n),
        };
        let working_weights = self
            .weights
            .as_ref()
            .map(|w| coords.gauss.apply_to_slice(&coords.random.apply_to_slice(w)));
        let mut session = Session {
            k,
            z: working.submatrix(&all_rows, &z_cols),
            coords,
            working_weights,
            best: None,
            improved: false,
        };

        let half = k / 2;
        let mut table = CollisionTable::new(sigma as u32);
        let mut iterations = 0;

        'search: while iterations < params.iterations {
            iterations += 1;
            session.improved = false;

            let subset = if sigma == 0 {
                Vec::new()
            } else {
                self.rng.sample_without_replacement(0, redundancy - 1, sigma)
            };
            let keys: Vec<u32> = session.z.iter().map(|row| project(row, &subset)).collect();

            for a in 0..half {
                table.insert(keys[a], a, None);
                for b in a + 1..half {
                    table.insert(keys[a] ^ keys[b], a, Some(b));
                }
            }

            for i in half..k {
                for entry in table.chain(keys[i]) {
                    if self.consider(&mut session, entry, &[i], params, log)? {
                        break 'search;
                    }
                }
                for j in i + 1..k {
                    for entry in table.chain(keys[i] ^ keys[j]) {
                        if self.consider(&mut session, entry, &[i, j], params, log)? {
                            break 'search;
                        }
                    }
                }
            }

            table.clear();
            self.delta_gauss(&mut session);

            if session.improved {
                let weight = session.best.as_ref().map_or(0, |(w, _)| *w);
                if params.progress {
                    info!(iteration = iterations - 1, weight, "New minimum");
                } else {
                    debug!(iteration = iterations - 1, weight, "New minimum");
                }
            }
            if matches!(session.best, Some((0, _))) {
                break;
            }
        }

        if let Some((weight, codeword)) = session.best {
            info!(weight, iterations, "Search finished");
            return Ok(SearchOutcome {
                codeword,
                weight,
                iterations,
                fallback: false,
            });
        }

        // No collision was accepted, fall back to the lightest generator row
        let restored = BitMatrix::from_rows(
            working
                .iter()
                .map(|row| session.coords.restore_systematic(row))
                .collect(),
        )?;
        let Some((index, weight)) = restored.min_weight_row(self.weights.as_deref()) else {
            return Err(SearchError::invalid_input("generator has no rows"));
        };
        let codeword = restored.row(index).clone();
        warn!(weight, iterations, "No collision accepted, returning the lightest generator row");
        self.combined_rows = vec![index];
        log.record(weight, &codeword)?;
        Ok(SearchOutcome {
            codeword,
            weight,
            iterations,
            fallback: true,
        })
    }

    /// Evaluates the combination of `entry` with the second-half rows `tail`.
    /// Returns true once the target weight is reached.
    fn consider<L>(
        &mut self,
        session: &mut Session,
        entry: CollisionEntry,
        tail: &[usize],
        params: &SearchParams,
        log: &mut L,
    ) -> SearchResult<bool>
    where
        L: ResultLog + ?Sized,
    {
        let mut rows = Vec::with_capacity(entry.rows() + tail.len());
        rows.push(entry.first);
        rows.extend(entry.second);
        rows.extend_from_slice(tail);

        let mut z_sum = session.z[rows[0]].clone();
        for &row in &rows[1..] {
            z_sum ^= &session.z[row];
        }
        let weight = session.candidate_weight(&rows, &z_sum);
        if session.best.as_ref().is_some_and(|(best, _)| weight >= *best) {
            return Ok(false);
        }

        let codeword = session.codeword(&rows, &z_sum);
        if let Some(check) = self.check.as_mut() {
            if !check(&codeword) {
                debug!(weight, "candidate rejected by check");
                return Ok(false);
            }
        }
        debug_assert_eq!(weight, self.true_weight(&codeword));

        self.combined_rows = rows;
        log.record(weight, &codeword)?;
        session.best = Some((weight, codeword));
        session.improved = true;
        Ok(weight <= params.minimum_weight)
    }

    /// One random single-pivot elimination step on Z.
    ///
    /// A uniformly chosen one at `(lambda, mu)` becomes the pivot: row `lambda`
    /// is added to every other row with a one in column `mu`, whose entries stay
    /// as they were since that column now stands for the swapped-out identity
    /// column `lambda`.
    fn delta_gauss(&mut self, session: &mut Session) {
        let ones: usize = session.z.iter().map(|row| row.weight() as usize).sum();
        if ones == 0 {
            debug!("Z has no ones, skipping Delta-Gauss step");
            return;
        }
        let target = self.rng.uniform(ones);
        let Some((lambda, mu)) = nth_one(&session.z, target) else {
            return;
        };

        for i in 0..session.k {
            if i != lambda && session.z.get(i, mu) {
                session.z.xor_rows(i, lambda);
                session.z.set(i, mu, true);
                self.gauss_combinations.xor_rows(i, lambda);
            }
        }
        session.coords.delta.swap(lambda, session.k + mu);
        if let Some(weights) = session.working_weights.as_mut() {
            weights.swap(lambda, session.k + mu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&str]) -> BitMatrix {
        BitMatrix::from_rows(
            rows.iter()
                .map(|r| r.chars().filter(|c| !c.is_whitespace()).map(|c| c == '1').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn projection_is_msb_first() {
        let row = BitVector::from_bits([true, false, true, true]);
        assert_eq!(project(&row, &[0, 1, 2]), 0b101);
        assert_eq!(project(&row, &[3, 1]), 0b10);
        assert_eq!(project(&row, &[]), 0);
    }

    #[test]
    fn nth_one_walks_rows_in_order() {
        let z = matrix(&["0110", "0000", "1001"]);
        assert_eq!(nth_one(&z, 0), Some((0, 1)));
        assert_eq!(nth_one(&z, 1), Some((0, 2)));
        assert_eq!(nth_one(&z, 2), Some((2, 0)));
        assert_eq!(nth_one(&z, 3), Some((2, 3)));
        assert_eq!(nth_one(&z, 4), None);
    }

    #[test]
    fn delta_gauss_keeps_the_code_and_the_pivot_column() {
        let generator = matrix(&["100 1101", "010 0111", "001 1011"]);
        let k = generator.rows();
        let n = generator.cols();
        let mut search = LowWeightSearch::with_seed(5);
        search.gauss_combinations = BitMatrix::identity(k);
        let rows: Vec<usize> = (0..k).collect();
        let z_cols: Vec<usize> = (k..n).collect();
        let mut session = Session {
            k,
            z: generator.submatrix(&rows, &z_cols),
            coords: Coordinates {
                random: Permutation::identity(n),
                gauss: Permutation::identity(n),
                delta: Permutation::identity(n),
            },
            working_weights: None,
            best: None,
            improved: false,
        };

        for _ in 0..10 {
            search.delta_gauss(&mut session);
            // every working row [I | Z] maps back to the sum of the tracked rows
            for i in 0..k {
                let mut z_sum = BitVector::zeros(n - k);
                z_sum ^= &session.z[i];
                let restored = session.codeword(&[i], &z_sum);
                let mut expected = BitVector::zeros(n);
                for j in search.gauss_combinations()[i].iter_ones() {
                    expected ^= &generator[j];
                }
                assert_eq!(restored, expected);
            }
        }
    }

    #[test]
    fn information_lines_end_up_in_the_header() {
        let mut search = LowWeightSearch::with_seed(9);
        search.add_information("SHA-1");
        search.add_information("message expansion");
        let header = search.result_header(&SearchParams::default());
        assert_eq!(header.info, "SHA-1 message expansion");
        assert_eq!(header.integers["sigma"], 20);
        assert_eq!(header.integers["seed"], 9);
    }

    #[test]
    fn random_permutation_moves_columns_consistently() {
        let original = matrix(&["1100 1010", "0011 0110"]);
        let mut shuffled = original.clone();
        let mut search = LowWeightSearch::with_seed(2);
        let perm = search.random_permute_columns(&mut shuffled);
        assert_eq!(shuffled.unpermute_columns(&perm), original);
    }
}
