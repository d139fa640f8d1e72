// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Result files of found codewords.
//!
//! ```text
//! %BEGIN
//! Info: <free text>
//! %INTEGER
//! <name> <value>
//! %STRING
//! <name> <value>
//! %END
//! <weight> <bit> <bit> ...
//! ```

use crate::matrix_file::{parse_bits, render_bits};
use crate::{FsError, FsResult, TextFile};
use lws_gf2::BitVector;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BEGIN: &str = "%BEGIN";
const INTEGER: &str = "%INTEGER";
const STRING: &str = "%STRING";
const END: &str = "%END";
const INFO: &str = "Info:";

/// Named settings recorded ahead of the codewords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub info: String,
    pub integers: BTreeMap<String, u64>,
    pub strings: BTreeMap<String, String>,
}

impl Header {
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            ..Self::default()
        }
    }

    pub fn with_integer(mut self, name: impl Into<String>, value: u64) -> Self {
        self.integers.insert(name.into(), value);
        self
    }

    pub fn with_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(name.into(), value.into());
        self
    }

    fn render(&self) -> String {
        let mut out = format!("{BEGIN}\n{INFO} {}\n{INTEGER}\n", self.info);
        for (name, value) in &self.integers {
            out.push_str(&format!("{name} {value}\n"));
        }
        out.push_str(STRING);
        out.push('\n');
        for (name, value) in &self.strings {
            out.push_str(&format!("{name} {value}\n"));
        }
        out.push_str(END);
        out.push('\n');
        out
    }
}

/// One logged codeword with the weight that was reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordRecord {
    pub weight: u64,
    pub codeword: BitVector,
}

/// A fully parsed result file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodewordDocument {
    pub header: Header,
    pub records: Vec<CodewordRecord>,
}

#[derive(PartialEq)]
enum Section {
    Info,
    Integers,
    Strings,
    Records,
}

fn split_setting(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (line, ""),
    }
}

impl TextFile for CodewordDocument {
    fn parse(text: &str) -> FsResult<Self> {
        let mut lines = text.lines().enumerate();
        match lines.next() {
            Some((_, line)) if line.trim() == BEGIN => {}
            _ => {
                return Err(FsError::parse(1, format!("missing {BEGIN} header")));
            }
        }

        let mut doc = CodewordDocument::default();
        let mut section = Section::Info;
        for (index, raw) in lines {
            let line_no = index + 1;
            let line = raw.trim();
            match (&section, line) {
                (Section::Info, INTEGER) => section = Section::Integers,
                (Section::Integers, STRING) => section = Section::Strings,
                (Section::Strings, END) => section = Section::Records,
                (Section::Info, _) => {
                    let text = line.strip_prefix(INFO).unwrap_or(line).trim();
                    if !doc.header.info.is_empty() {
                        doc.header.info.push('\n');
                    }
                    doc.header.info.push_str(text);
                }
                (Section::Integers, _) if !line.is_empty() => {
                    let (name, value) = split_setting(line);
                    let value = value.parse::<u64>().map_err(|_| {
                        FsError::parse(line_no, format!("integer setting '{name}' has value '{value}'"))
                    })?;
                    doc.header.integers.insert(name.to_string(), value);
                }
                (Section::Strings, _) if !line.is_empty() => {
                    let (name, value) = split_setting(line);
                    doc.header.strings.insert(name.to_string(), value.to_string());
                }
                (Section::Records, _) if !line.is_empty() => {
                    let mut tokens = line.split_whitespace();
                    let weight = tokens
                        .next()
                        .and_then(|w| w.parse::<u64>().ok())
                        .ok_or_else(|| FsError::parse(line_no, "record does not start with a weight"))?;
                    let codeword = parse_bits(tokens, line_no)?;
                    if let Some(first) = doc.records.first() {
                        if first.codeword.len() != codeword.len() {
                            return Err(FsError::parse(
                                line_no,
                                format!(
                                    "codeword has {} bits but the first one has {}",
                                    codeword.len(),
                                    first.codeword.len()
                                ),
                            ));
                        }
                    }
                    doc.records.push(CodewordRecord { weight, codeword });
                }
                _ => {}
            }
        }

        if section != Section::Records {
            return Err(FsError::Format(format!("header is not closed by {END}")));
        }
        Ok(doc)
    }

    fn render(&self) -> String {
        let mut out = self.header.render();
        for record in &self.records {
            out.push_str(&format_record(record.weight, &record.codeword));
        }
        out
    }
}

fn format_record(weight: u64, codeword: &BitVector) -> String {
    let mut line = weight.to_string();
    if !codeword.is_empty() {
        line.push(' ');
        render_bits(&mut line, codeword);
    }
    line.push('\n');
    line
}

/// An append-only result file.
///
/// [`CodewordFile::create`] truncates the file and writes the header; every
/// [`CodewordFile::append`] reopens it in append mode so records survive an
/// interrupted search.
#[derive(Debug, Clone)]
pub struct CodewordFile {
    path: PathBuf,
    header: Header,
    written: usize,
}

impl CodewordFile {
    pub fn create<P: AsRef<Path>>(path: P, header: Header) -> FsResult<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::write(&path, header.render()).map_err(|e| FsError::io(&path, e))?;
        info!(path = %path.display(), "Created codeword file");
        Ok(Self {
            path,
            header,
            written: 0,
        })
    }

    /// Appends one `weight bits..` line.
    pub fn append(&mut self, weight: u64, codeword: &BitVector) -> FsResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| FsError::io(&self.path, e))?;
        file.write_all(format_record(weight, codeword).as_bytes())
            .map_err(|e| FsError::io(&self.path, e))?;
        self.written += 1;
        debug!(weight, records = self.written, "appended codeword");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Records appended through this handle.
    pub fn written(&self) -> usize {
        self.written
    }
}

pub fn read_codewords<P: AsRef<Path>>(path: P) -> FsResult<CodewordDocument> {
    CodewordDocument::read_from(path)
}
