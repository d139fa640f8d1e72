// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::Path;

use anyhow::{Context, Result};
use lws_config::SearchConfig;
use lws_fs::read_matrix;
use lws_gf2::{check_to_generator, shorten, BitMatrix};
use tracing::info;

pub mod telemetry;

/// Reads the code matrix at `path` and prepares it for searching: converts a
/// parity-check matrix to a generator and applies the configured shortening.
pub fn load_code(path: &Path, config: &SearchConfig) -> Result<BitMatrix> {
    let mut matrix = read_matrix(path)
        .with_context(|| format!("Could not read code matrix {}", path.display()))?;
    info!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        path = %path.display(),
        "Loaded code matrix"
    );

    if config.parity_check {
        matrix = check_to_generator(&matrix).context("Could not convert the parity-check matrix")?;
        info!(dimension = matrix.rows(), "Converted parity-check matrix to a generator");
    }

    if !config.shorten.is_empty() {
        matrix = shorten(&matrix, &config.shorten).context("Could not shorten the code")?;
    }

    Ok(matrix)
}
