// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::Path;

use anyhow::{Context, Result};
use lws_fs::{read_matrix, write_matrix};
use lws_search::check_to_generator;

pub fn execute(matrix: &Path, output: &Path) -> Result<()> {
    let h = read_matrix(matrix)
        .with_context(|| format!("Could not read parity-check matrix {}", matrix.display()))?;
    let g = check_to_generator(&h).context("Could not compute a generator")?;
    write_matrix(output, &g)?;
    println!(
        "{} x {} generator written to {}",
        g.rows(),
        g.cols(),
        output.display()
    );
    Ok(())
}
