// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{check_to_generator, inspect, print_config, search, sha1_me, shorten};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use lws_config::validation::ColumnList;
use lws_config::{load_config, CliOverrides, SearchConfig};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "lowweight")]
#[command(about = "Search linear codes over GF(2) for low-weight codewords", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,

    /// Increase log output with additional `-v` arguments. Eg. `lowweight -vv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Only print errors. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::INFO,  //
                1 => Level::DEBUG, // -v
                _ => Level::TRACE, // -vv
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        let config = self.load_config()?;
        debug!(?config, "Configuration resolved");

        match self.command {
            Commands::Search(_) => search::execute(&config)?,
            Commands::Shorten {
                matrix,
                columns,
                output,
            } => shorten::execute(&matrix, columns.into_inner(), &output)?,
            Commands::CheckToGenerator { matrix, output } => {
                check_to_generator::execute(&matrix, &output)?
            }
            Commands::Inspect {
                codeword_file,
                matrix,
            } => inspect::execute(&config, codeword_file, matrix)?,
            Commands::Sha1Me {
                words,
                output,
                zero_last_word,
            } => sha1_me::execute(words, &output, zero_last_word)?,
            Commands::PrintConfig => print_config::execute(&config)?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<SearchConfig> {
        load_config(self.config.clone(), &self.command.overrides())
    }
}

/// Flags shared by every command that runs a search or reads its settings.
#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    /// Code matrix file, one row per line
    pub code_matrix: Option<PathBuf>,

    /// Width of the collision subset (at most 30)
    #[arg(short, long)]
    pub sigma: Option<u32>,

    /// Number of iterations
    #[arg(short, long)]
    pub iterations: Option<u64>,

    /// Stop as soon as a codeword of at most this weight is found
    #[arg(short, long)]
    pub minimum: Option<u64>,

    /// File the found codewords are appended to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not print progress lines
    #[arg(short, long)]
    pub disable_progress: bool,

    /// Randomly permute the columns before the search
    #[arg(short, long)]
    pub permute_columns: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// File of per-column weights
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Treat the code matrix as a parity-check matrix
    #[arg(long)]
    pub parity_check: bool,

    /// Columns to force to zero, eg. `0,3,480-511`
    #[arg(long, value_name = "COLUMNS")]
    pub shorten: Option<ColumnList>,
}

impl SearchArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sigma: self.sigma,
            iterations: self.iterations,
            minimum: self.minimum,
            output: self.output.clone(),
            disable_progress: self.disable_progress.then_some(true),
            permute_columns: self.permute_columns.then_some(true),
            code_matrix: self.code_matrix.clone(),
            seed: self.seed,
            weights: self.weights.clone(),
            parity_check: self.parity_check.then_some(true),
            shorten: self.shorten.clone().map(ColumnList::into_inner),
            ..CliOverrides::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a code for low-weight codewords
    Search(SearchArgs),

    /// Shorten a generator matrix by forcing columns to zero
    Shorten {
        /// Generator matrix file
        matrix: PathBuf,

        /// Columns to force to zero, eg. `0,3,480-511`
        #[arg(long)]
        columns: ColumnList,

        /// Where to write the shortened generator
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a parity-check matrix into a generator matrix
    CheckToGenerator {
        /// Parity-check matrix file
        matrix: PathBuf,

        /// Where to write the generator
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print and verify the records of a codeword file
    Inspect {
        /// Codeword file, defaults to `codeword_file` from the configuration
        codeword_file: Option<PathBuf>,

        /// Generator matrix the codewords should belong to
        #[arg(long)]
        matrix: Option<PathBuf>,
    },

    /// Write the generator of the SHA-1 message expansion code
    Sha1Me {
        /// Number of expanded 32-bit words per message
        #[arg(long, default_value_t = sha1_me::EXPANDED_WORDS)]
        words: usize,

        /// Where to write the generator
        #[arg(short, long, default_value = "sha1me.cm")]
        output: PathBuf,

        /// Force the last expanded word to zero
        #[arg(long)]
        zero_last_word: bool,
    },

    /// Print the resolved configuration as YAML
    PrintConfig,
}

impl Commands {
    fn overrides(&self) -> CliOverrides {
        match self {
            Commands::Search(args) => args.overrides(),
            Commands::Inspect { codeword_file, .. } => CliOverrides {
                codeword_file: codeword_file.clone(),
                ..CliOverrides::default()
            },
            _ => CliOverrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;
    use tracing::Level;

    #[test]
    fn search_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "lowweight", "search", "sha1me.cm", "-s", "12", "-i", "1000", "-m", "40", "-p",
            "--shorten", "1888-1919",
        ])
        .unwrap();
        let overrides = cli.command.overrides();
        assert_eq!(overrides.sigma, Some(12));
        assert_eq!(overrides.iterations, Some(1000));
        assert_eq!(overrides.minimum, Some(40));
        assert_eq!(overrides.permute_columns, Some(true));
        assert_eq!(overrides.code_matrix, Some(PathBuf::from("sha1me.cm")));
        assert_eq!(overrides.shorten, Some((1888..1920).collect()));
    }

    #[test]
    fn unset_flags_leave_lower_layers_alone() {
        let cli = Cli::try_parse_from(["lowweight", "search"]).unwrap();
        let overrides = cli.command.overrides();
        assert_eq!(overrides.sigma, None);
        assert_eq!(overrides.disable_progress, None);
        assert_eq!(overrides.parity_check, None);
        assert_eq!(overrides.shorten, None);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let level = |args: &[&str]| Cli::try_parse_from(args.iter().copied()).unwrap().log_level();
        assert_eq!(level(&["lowweight", "print-config"]), Level::INFO);
        assert_eq!(level(&["lowweight", "-v", "print-config"]), Level::DEBUG);
        assert_eq!(level(&["lowweight", "print-config", "-vv"]), Level::TRACE);
        assert_eq!(level(&["lowweight", "-q", "print-config"]), Level::ERROR);
        assert!(Cli::try_parse_from(["lowweight", "-q", "-v", "print-config"]).is_err());
    }

    #[test]
    fn sha1_me_defaults() {
        let cli = Cli::try_parse_from(["lowweight", "sha1-me"]).unwrap();
        match cli.command {
            Commands::Sha1Me {
                words,
                output,
                zero_last_word,
            } => {
                assert_eq!(words, 60);
                assert_eq!(output, PathBuf::from("sha1me.cm"));
                assert!(!zero_last_word);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bad_column_list_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["lowweight", "search", "--shorten", "3-1"]).is_err());
    }
}
