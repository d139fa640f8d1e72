// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::Path;

use anyhow::{Context, Result};
use lws_fs::{read_matrix, write_matrix};
use lws_search::shorten;

pub fn execute(matrix: &Path, columns: Vec<usize>, output: &Path) -> Result<()> {
    let generator = read_matrix(matrix)
        .with_context(|| format!("Could not read generator {}", matrix.display()))?;
    let shortened = shorten(&generator, &columns)?;
    write_matrix(output, &shortened)?;
    println!(
        "[{}, {}] code written to {}",
        shortened.cols(),
        shortened.rows(),
        output.display()
    );
    Ok(())
}
