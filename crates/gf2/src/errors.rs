// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for GF(2) matrix operations
//!
//! Indexing past the end of a vector or matrix is a contract violation and panics.
//! Everything a caller can trigger with well-formed but unsuitable input is
//! reported through [`Gf2Error`] instead.

use thiserror::Error;

/// Main error type for bit matrix and elimination operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Gf2Error {
    /// A row of the wrong length was offered to a matrix
    #[error("Row length mismatch: matrix has {expected} columns, row has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Elimination ran out of pivots before reaching systematic form
    #[error("Matrix does not have full rank: found {rank} pivots for {rows} rows")]
    RankDeficient { rank: usize, rows: usize },

    /// Shortening eliminated every row of the code
    #[error("Shortening is infeasible: forcing {forced} columns to zero leaves none of the {dimension} rows")]
    ShorteningInfeasible { forced: usize, dimension: usize },

    /// Column lists with duplicates or out-of-range entries
    #[error("Invalid column selection: {message}")]
    InvalidColumns { message: String },

    /// Operand shapes that do not fit together
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for GF(2) operations
pub type Gf2Result<T> = Result<T, Gf2Error>;

impl Gf2Error {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        Gf2Error::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid column selection error
    pub fn invalid_columns(message: impl Into<String>) -> Self {
        Gf2Error::InvalidColumns {
            message: message.into(),
        }
    }
}
