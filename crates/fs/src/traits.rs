// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{FsError, FsResult};
use std::path::Path;
use tracing::debug;

/// A value with a plain-text file representation.
pub trait TextFile: Sized {
    fn parse(text: &str) -> FsResult<Self>;

    fn render(&self) -> String;

    fn read_from<P: AsRef<Path>>(path: P) -> FsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FsError::io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "read text file");
        Self::parse(&text)
    }

    fn write_to<P: AsRef<Path>>(&self, path: P) -> FsResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|e| FsError::io(path, e))?;
        debug!(path = %path.display(), "wrote text file");
        Ok(())
    }
}
