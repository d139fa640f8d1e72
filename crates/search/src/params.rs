// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};

/// Upper bound for sigma; the collision table holds `2^sigma` chain heads.
pub const MAX_SIGMA: u32 = 30;

/// Tunables of one Canteaut-Chabaud run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Width of the column subset used as collision key
    pub sigma: u32,
    /// Number of iterations before giving up
    pub iterations: u64,
    /// Stop as soon as a codeword of at most this weight is accepted
    pub minimum_weight: u64,
    /// Randomly permute the generator columns before reducing it
    pub permute_columns: bool,
    /// Report improvements at `info` instead of `debug`
    pub progress: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            sigma: 20,
            iterations: 20,
            minimum_weight: 0,
            permute_columns: false,
            progress: true,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> SearchResult<()> {
        if self.sigma > MAX_SIGMA {
            return Err(SearchError::invalid_parameter(
                "sigma",
                format!("{} is too large, the value must not exceed {MAX_SIGMA}", self.sigma),
            ));
        }
        Ok(())
    }
}
