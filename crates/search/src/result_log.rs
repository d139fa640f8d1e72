// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::SearchResult;
use lws_fs::CodewordFile;
use lws_gf2::BitVector;

/// Destination for every codeword the search accepts, in acceptance order.
pub trait ResultLog {
    fn record(&mut self, weight: u64, codeword: &BitVector) -> SearchResult<()>;
}

impl ResultLog for CodewordFile {
    fn record(&mut self, weight: u64, codeword: &BitVector) -> SearchResult<()> {
        self.append(weight, codeword)?;
        Ok(())
    }
}

/// In-memory log
impl ResultLog for Vec<(u64, BitVector)> {
    fn record(&mut self, weight: u64, codeword: &BitVector) -> SearchResult<()> {
        self.push((weight, codeword.clone()));
        Ok(())
    }
}

impl<L: ResultLog + ?Sized> ResultLog for &mut L {
    fn record(&mut self, weight: u64, codeword: &BitVector) -> SearchResult<()> {
        (**self).record(weight, codeword)
    }
}
