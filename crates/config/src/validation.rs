// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::str::FromStr;

use anyhow::{bail, Context};

/// Column indices written as a comma separated list of numbers and
/// inclusive ranges, e.g. `0,3,8-11`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ColumnList(Vec<usize>);

impl ColumnList {
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl FromStr for ColumnList {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut columns = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((from, to)) => {
                    let from: usize = from
                        .trim()
                        .parse()
                        .with_context(|| format!("invalid range start in '{part}'"))?;
                    let to: usize = to
                        .trim()
                        .parse()
                        .with_context(|| format!("invalid range end in '{part}'"))?;
                    if from > to {
                        bail!("range '{part}' is empty");
                    }
                    columns.extend(from..=to);
                }
                None => columns.push(
                    part.parse()
                        .with_context(|| format!("invalid column '{part}'"))?,
                ),
            }
        }
        Ok(ColumnList(columns))
    }
}

impl From<ColumnList> for Vec<usize> {
    fn from(value: ColumnList) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnList;

    #[test]
    fn parses_numbers_and_ranges() {
        let list: ColumnList = "0, 3,8-11".parse().unwrap();
        assert_eq!(list.into_inner(), vec![0, 3, 8, 9, 10, 11]);
        let empty: ColumnList = "".parse().unwrap();
        assert!(empty.into_inner().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!("1,x".parse::<ColumnList>().is_err());
        assert!("5-2".parse::<ColumnList>().is_err());
        assert!("-3".parse::<ColumnList>().is_err());
    }
}
