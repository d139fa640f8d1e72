// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lws_fs::FsError;
use lws_gf2::Gf2Error;
use thiserror::Error;

/// Errors that stop a search before or while it runs
#[derive(Error, Debug)]
pub enum SearchError {
    /// The generator or weight vector cannot be searched
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A search parameter is out of range
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error(transparent)]
    Gf2(#[from] Gf2Error),

    /// The result log refused a record
    #[error("Failed to record codeword: {0}")]
    Log(#[from] FsError),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SearchError::InvalidInput(message.into())
    }

    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        SearchError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
