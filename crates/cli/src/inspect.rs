// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use lws_config::SearchConfig;
use lws_fs::{read_codewords, CodewordDocument, TextFile, Weights};
use lws_gf2::{rank, BitMatrix, BitVector};
use tracing::{info, warn};

use crate::helpers::load_code;

/// Findings for one record of a codeword file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub recorded: u64,
    pub computed: u64,
    /// `None` when no matrix was given
    pub in_code: Option<bool>,
}

impl RecordReport {
    pub fn is_consistent(&self) -> bool {
        self.recorded == self.computed && self.in_code != Some(false)
    }
}

fn in_row_space(generator: &BitMatrix, rank_g: usize, word: &BitVector) -> bool {
    let mut extended = generator.clone();
    extended.push_row(word.clone()).is_ok() && rank(&extended) == rank_g
}

/// Recomputes the weight of every record and, given a generator, checks that
/// each word lies in its row space.
///
/// Fails if `weights` does not have one entry per codeword bit.
pub fn check(
    document: &CodewordDocument,
    generator: Option<&BitMatrix>,
    weights: Option<&[u64]>,
) -> Result<Vec<RecordReport>> {
    if let (Some(w), Some(first)) = (weights, document.records.first()) {
        if w.len() != first.codeword.len() {
            bail!(
                "weight vector has {} entries but the codewords have {} bits",
                w.len(),
                first.codeword.len()
            );
        }
    }

    let rank_g = generator.map(rank);
    let reports = document
        .records
        .iter()
        .map(|record| {
            let computed = match weights {
                Some(w) => record.codeword.weighted_weight(w),
                None => record.codeword.weight(),
            };
            let in_code = generator
                .zip(rank_g)
                .map(|(g, r)| in_row_space(g, r, &record.codeword));
            RecordReport {
                recorded: record.weight,
                computed,
                in_code,
            }
        })
        .collect();
    Ok(reports)
}

pub fn execute(
    config: &SearchConfig,
    codeword_file: Option<PathBuf>,
    matrix: Option<PathBuf>,
) -> Result<()> {
    let path = codeword_file
        .or_else(|| config.codeword_file.clone())
        .context("No codeword file given. Pass it as an argument or set `codeword_file`")?;
    let document = read_codewords(&path)
        .with_context(|| format!("Could not read codeword file {}", path.display()))?;
    info!(records = document.records.len(), path = %path.display(), "Loaded codewords");

    let generator = matrix
        .as_deref()
        .map(|m| load_code(m, config))
        .transpose()?;
    let weights = config
        .weights
        .as_ref()
        .map(|w| Weights::read_from(w).map(Weights::into_inner))
        .transpose()?;

    if !document.header.info.is_empty() {
        println!("{}", document.header.info);
    }
    for (name, value) in &document.header.integers {
        println!("{name} = {value}");
    }
    for (name, value) in &document.header.strings {
        println!("{name} = {value}");
    }

    let reports = check(&document, generator.as_ref(), weights.as_deref())?;
    let mut inconsistent = 0;
    for (i, (record, report)) in document.records.iter().zip(&reports).enumerate() {
        println!("#{i} weight {} {:x}", report.recorded, record.codeword);
        if !report.is_consistent() {
            warn!(
                record = i,
                recorded = report.recorded,
                computed = report.computed,
                in_code = ?report.in_code,
                "Record does not check out"
            );
            inconsistent += 1;
        }
    }

    if inconsistent > 0 {
        bail!("{inconsistent} of {} records failed verification", reports.len());
    }
    println!("{} records verified", reports.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check, execute, RecordReport};
    use lws_config::SearchConfig;
    use lws_fs::{write_matrix, CodewordDocument, CodewordRecord};
    use lws_gf2::{BitMatrix, BitVector};
    use lws_test_helpers::{extended_hamming_generator, write_file_with_dirs};

    fn bits(s: &str) -> BitVector {
        s.chars().map(|c| c == '1').collect()
    }

    fn document(records: &[(u64, &str)]) -> CodewordDocument {
        CodewordDocument {
            records: records
                .iter()
                .map(|&(weight, word)| CodewordRecord {
                    weight,
                    codeword: bits(word),
                })
                .collect(),
            ..CodewordDocument::default()
        }
    }

    #[test]
    fn flags_wrong_weights_and_foreign_words() {
        let g = BitMatrix::from_rows(vec![bits("1100"), bits("0011")]).unwrap();
        let doc = document(&[(2, "1100"), (3, "1111"), (1, "1000")]);
        let reports = check(&doc, Some(&g), None).unwrap();
        assert_eq!(
            reports,
            vec![
                RecordReport { recorded: 2, computed: 2, in_code: Some(true) },
                RecordReport { recorded: 3, computed: 4, in_code: Some(true) },
                RecordReport { recorded: 1, computed: 1, in_code: Some(false) },
            ]
        );
        let consistent: Vec<bool> = reports.iter().map(RecordReport::is_consistent).collect();
        assert_eq!(consistent, vec![true, false, false]);
    }

    #[test]
    fn weights_are_applied_when_lengths_match() {
        let doc = document(&[(5, "101")]);
        let reports = check(&doc, None, Some(&[2, 9, 3][..])).unwrap();
        assert_eq!(reports[0].computed, 5);
        assert_eq!(reports[0].in_code, None);
        assert!(reports[0].is_consistent());
    }

    #[test]
    fn weight_vector_of_the_wrong_length_is_an_error() {
        let doc = document(&[(2, "101")]);
        let err = check(&doc, None, Some(&[1, 1][..])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "weight vector has 2 entries but the codewords have 3 bits"
        );
    }

    #[test]
    fn verifies_a_result_file_against_its_code() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = dir.path().join("code.cm");
        write_matrix(&matrix, &extended_hamming_generator()).unwrap();

        let found = dir.path().join("runs").join("found.cw");
        let text = "%BEGIN\nInfo: fixture\n%INTEGER\nsigma 2\n%STRING\n%END\n\
                    4 1 1 0 0 0 1 1 0\n";
        write_file_with_dirs(&found, text).unwrap();
        execute(&SearchConfig::default(), Some(found.clone()), Some(matrix.clone())).unwrap();

        let wrong = dir.path().join("runs").join("wrong.cw");
        write_file_with_dirs(&wrong, &text.replace("4 1 1", "3 1 1")).unwrap();
        assert!(execute(&SearchConfig::default(), Some(wrong), Some(matrix)).is_err());
    }

    #[test]
    fn codeword_file_falls_back_to_the_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let found = dir.path().join("found.cw");
        write_file_with_dirs(&found, "%BEGIN\nInfo:\n%INTEGER\n%STRING\n%END\n2 0 1 1\n").unwrap();
        let config = SearchConfig {
            codeword_file: Some(found),
            ..SearchConfig::default()
        };
        execute(&config, None, None).unwrap();
        assert!(execute(&SearchConfig::default(), None, None).is_err());
    }
}
