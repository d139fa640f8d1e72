// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{Gf2Error, Gf2Result};
use crate::{BitMatrix, Permutation};
use tracing::{debug, info};

/// Reduce a matrix to systematic form `[I | Z]` by Gauss-Jordan elimination
///
/// Pivots are taken from column `j` when possible; otherwise the first column
/// right of `j` with a one in row `j` is swapped into place. The returned
/// permutation records those swaps: column `i` of the result is column `perm[i]`
/// of the input (up to row operations).
///
/// If `tracker` is given, every row swap and row addition is applied to it as
/// well, so starting from the identity it ends up holding the row combinations.
///
/// # Errors
///
/// Fails with [`Gf2Error::RankDeficient`] as soon as a row runs out of pivots.
/// The matrix is then left partially reduced.
pub fn reduce_to_systematic(
    matrix: &mut BitMatrix,
    mut tracker: Option<&mut BitMatrix>,
) -> Gf2Result<Permutation> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let mut perm = Permutation::identity(cols);

    info!(rows, cols, "Applying Gauss-Jordan elimination");

    if let Some(t) = tracker.as_deref() {
        if t.rows() != rows {
            return Err(Gf2Error::dimension_mismatch(rows, t.rows(), "tracker rows"));
        }
    }

    for j in 0..rows {
        if j >= cols {
            return Err(Gf2Error::RankDeficient { rank: j, rows });
        }

        if let Some(pivot) = (j..rows).find(|&i| matrix.get(i, j)) {
            if pivot != j {
                matrix.swap_rows(pivot, j);
                if let Some(t) = tracker.as_deref_mut() {
                    t.swap_rows(pivot, j);
                }
            }
        } else {
            // Column swaps are slow, only reached when the column is empty below j
            let Some(col) = (j + 1..cols).find(|&c| matrix.get(j, c)) else {
                return Err(Gf2Error::RankDeficient { rank: j, rows });
            };
            debug!(pivot = j, col, "swapping column into pivot position");
            matrix.swap_columns(j, col);
            perm.swap(j, col);
        }

        for i in 0..rows {
            if i != j && matrix.get(i, j) {
                matrix.xor_rows(i, j);
                if let Some(t) = tracker.as_deref_mut() {
                    t.xor_rows(i, j);
                }
            }
        }
    }

    Ok(perm)
}

/// Shorten a code by forcing `columns` to zero
///
/// Each target column is cleared with one pivot row, which is then dropped;
/// columns without a pivot are already zero and cost no dimension. Finally the
/// target columns themselves are removed.
///
/// # Errors
///
/// - [`Gf2Error::InvalidColumns`] for duplicate or out-of-range columns
/// - [`Gf2Error::ShorteningInfeasible`] if no rows remain
pub fn shorten(matrix: &BitMatrix, columns: &[usize]) -> Gf2Result<BitMatrix> {
    let cols = matrix.cols();
    let mut sorted = columns.to_vec();
    sorted.sort_unstable();
    if let Some(&bad) = sorted.iter().find(|&&c| c >= cols) {
        return Err(Gf2Error::invalid_columns(format!(
            "column {bad} is out of range for length {cols}"
        )));
    }
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(Gf2Error::invalid_columns(format!(
            "column {} is listed twice",
            pair[0]
        )));
    }

    let mut out = matrix.clone();
    for &col in columns {
        let Some(pivot) = (0..out.rows()).find(|&i| out.get(i, col)) else {
            debug!(col, "column already zero, nothing to eliminate");
            continue;
        };
        for i in 0..out.rows() {
            if i != pivot && out.get(i, col) {
                out.xor_rows(i, pivot);
            }
        }
        out.delete_row(pivot);
    }

    if out.rows() == 0 {
        return Err(Gf2Error::ShorteningInfeasible {
            forced: columns.len(),
            dimension: matrix.rows(),
        });
    }

    for &col in sorted.iter().rev() {
        out.delete_column(col);
    }

    info!(
        dimension = out.rows(),
        length = out.cols(),
        "Shortened code"
    );
    Ok(out)
}

/// Compute a generator matrix from a parity-check matrix
///
/// A copy of `h` (r × n, rank r) is reduced to `[I | B]` under some column
/// permutation; `[Bᵀ | I]` spans its null space in those coordinates, and undoing
/// the permutation gives a k × n generator with `H · Gᵀ = 0`, k = n − r.
pub fn check_to_generator(h: &BitMatrix) -> Gf2Result<BitMatrix> {
    let r = h.rows();
    let n = h.cols();
    if r == 0 {
        return Err(Gf2Error::dimension_mismatch(1, 0, "parity-check rows"));
    }
    if r >= n {
        return Err(Gf2Error::dimension_mismatch(
            n.saturating_sub(1),
            r,
            "parity-check rows (must be fewer than columns)",
        ));
    }

    let mut reduced = h.clone();
    let perm = reduce_to_systematic(&mut reduced, None)?;

    let k = n - r;
    let mut g = BitMatrix::zeros(k, n);
    for i in 0..k {
        for j in 0..r {
            if reduced.get(j, r + i) {
                g.set(i, j, true);
            }
        }
        g.set(i, r + i, true);
    }

    let g = g.unpermute_columns(&perm);
    debug_assert!(verify_parity(h, &g));
    Ok(g)
}

/// Verify that `H · Gᵀ = 0` over GF(2)
pub fn verify_parity(h: &BitMatrix, g: &BitMatrix) -> bool {
    if h.is_empty() || g.is_empty() {
        return true;
    }
    if h.cols() != g.cols() {
        return false;
    }
    h.iter()
        .all(|h_row| g.iter().all(|g_row| !h_row.dot(g_row)))
}

/// Rank over GF(2), computed on a scratch copy.
pub fn rank(matrix: &BitMatrix) -> usize {
    let mut work = matrix.clone();
    let mut pivots = 0;
    for col in 0..work.cols() {
        if pivots == work.rows() {
            break;
        }
        let Some(pivot) = (pivots..work.rows()).find(|&i| work.get(i, col)) else {
            continue;
        };
        work.swap_rows(pivot, pivots);
        for i in 0..work.rows() {
            if i != pivots && work.get(i, col) {
                work.xor_rows(i, pivots);
            }
        }
        pivots += 1;
    }
    pivots
}
