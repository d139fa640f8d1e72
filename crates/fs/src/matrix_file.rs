// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{FsError, FsResult, TextFile};
use lws_gf2::{BitMatrix, BitVector};

/// Parses one line of `0`/`1` tokens. `line` is used for error messages only.
pub(crate) fn parse_bits<'a, I>(tokens: I, line: usize) -> FsResult<BitVector>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(|token| match token {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(FsError::parse(
                line,
                format!("expected 0 or 1, found '{other}'"),
            )),
        })
        .collect::<FsResult<Vec<bool>>>()
        .map(BitVector::from_bits)
}

pub(crate) fn render_bits(out: &mut String, bits: &BitVector) {
    out.push_str(&bits.to_string());
}

impl TextFile for BitMatrix {
    fn parse(text: &str) -> FsResult<Self> {
        let mut matrix = BitMatrix::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = parse_bits(line.split_whitespace(), index + 1)?;
            if !matrix.is_empty() && row.len() != matrix.cols() {
                return Err(FsError::parse(
                    index + 1,
                    format!(
                        "row has {} entries but the first row has {}",
                        row.len(),
                        matrix.cols()
                    ),
                ));
            }
            matrix
                .push_row(row)
                .map_err(|e| FsError::parse(index + 1, e.to_string()))?;
        }
        Ok(matrix)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in self {
            render_bits(&mut out, row);
            out.push('\n');
        }
        out
    }
}

/// Per-column weights for the weighted search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Weights(pub Vec<u64>);

impl Weights {
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl TextFile for Weights {
    fn parse(text: &str) -> FsResult<Self> {
        let mut weights = Vec::new();
        for (index, line) in text.lines().enumerate() {
            for token in line.split_whitespace() {
                let value = token.parse::<u64>().map_err(|_| {
                    FsError::parse(index + 1, format!("'{token}' is not a non-negative integer"))
                })?;
                weights.push(value);
            }
        }
        Ok(Weights(weights))
    }

    fn render(&self) -> String {
        let line = self
            .0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{line}\n")
    }
}

pub fn read_matrix<P: AsRef<std::path::Path>>(path: P) -> FsResult<BitMatrix> {
    BitMatrix::read_from(path)
}

pub fn write_matrix<P: AsRef<std::path::Path>>(path: P, matrix: &BitMatrix) -> FsResult<()> {
    matrix.write_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let m = BitMatrix::parse("1 0 1 1\n\n  0 1 1 0  \n").unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 4);
        assert!(m.get(0, 3));
        assert!(!m.get(1, 0));
    }

    #[test]
    fn reports_bad_token_with_line_number() {
        let err = BitMatrix::parse("1 0\n\n1 2\n").unwrap_err();
        match err {
            FsError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("'2'"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reports_ragged_rows() {
        let err = BitMatrix::parse("1 0 1\n1 0\n").unwrap_err();
        assert!(matches!(err, FsError::Parse { line: 2, .. }));
    }

    #[test]
    fn matrix_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("code.cm");
        let m = BitMatrix::parse("1 0 0 1 1\n0 1 0 1 0\n0 0 1 0 1\n").unwrap();
        write_matrix(&path, &m).unwrap();
        assert_eq!(read_matrix(&path).unwrap(), m);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1 0 0 1 1\n0 1 0 1 0\n0 0 1 0 1\n"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_matrix(dir.path().join("absent.cm")).unwrap_err();
        assert!(matches!(err, FsError::Io { .. }));
    }

    #[test]
    fn weights_parse_across_lines() {
        let w = Weights::parse("1 2 3\n4\n").unwrap();
        assert_eq!(w.0, vec![1, 2, 3, 4]);
        assert_eq!(w.render(), "1 2 3 4\n");
        assert!(matches!(
            Weights::parse("1 -2").unwrap_err(),
            FsError::Parse { line: 1, .. }
        ));
    }
}
