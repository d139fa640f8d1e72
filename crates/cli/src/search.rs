// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use lws_config::SearchConfig;
use lws_fs::{CodewordFile, TextFile, Weights};
use lws_gf2::{rank, Gf2Error};
use lws_search::{LowWeightSearch, SearchOutcome};
use tracing::{info, warn};

use crate::helpers::load_code;

pub fn run(config: &SearchConfig) -> Result<SearchOutcome> {
    let path = config
        .code_matrix
        .as_deref()
        .context("No code matrix given. Pass it as an argument or set `code_matrix`")?;
    let generator = load_code(path, config)?;

    let mut engine = match config.seed {
        Some(seed) => LowWeightSearch::with_seed(seed),
        None => LowWeightSearch::new(),
    };
    engine.add_information(format!("code matrix {}", path.display()));

    if let Some(weights_path) = &config.weights {
        let weights = Weights::read_from(weights_path)
            .with_context(|| format!("Could not read weights {}", weights_path.display()))?;
        engine.set_weights(weights.into_inner());
    }

    let params = config.search_params();
    params.validate()?;
    // fail before the result file is created
    let rows = generator.rows();
    let row_rank = rank(&generator);
    if row_rank < rows {
        return Err(Gf2Error::RankDeficient {
            rank: row_rank,
            rows,
        })
            .context("The generator matrix does not have full row rank");
    }

    let header = config.header_entries(engine.result_header(&params));
    let mut log = CodewordFile::create(&config.output, header)
        .with_context(|| format!("Could not create {}", config.output.display()))?;

    let outcome = engine.canteaut_chabaud(&generator, &params, &mut log)?;
    info!(
        records = log.written(),
        path = %log.path().display(),
        "Search finished"
    );
    if outcome.fallback {
        warn!("No collision was accepted, reporting the lightest generator row");
    }
    Ok(outcome)
}

pub fn execute(config: &SearchConfig) -> Result<()> {
    let outcome = run(config)?;
    println!("{:x}", outcome.codeword);
    println!("Hamming weight is {}", outcome.weight);
    Ok(())
}
