// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the text formats
#[derive(Error, Debug)]
pub enum FsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input, `line` is 1-based
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Structurally valid lines that do not form a valid document
    #[error("Format error: {0}")]
    Format(String),
}

pub type FsResult<T> = Result<T, FsError>;

impl FsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        FsError::Parse {
            line,
            message: message.into(),
        }
    }
}
