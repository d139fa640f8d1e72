// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use lws_fs::Header;
use lws_search::SearchParams;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::load_config::{
    find_in_parent, resolve_config_path, ConfigSource, OsDirs, DEFAULT_CONFIG_NAME,
};

pub const ENV_PREFIX: &str = "LWS_";

/// Every setting of a search run.
///
/// Values are layered: built-in defaults, then the YAML file, then `LWS_*`
/// environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Width of the collision subset, at most 30
    pub sigma: u32,
    pub iterations: u64,
    /// Stop once a codeword of at most this weight is found
    pub minimum: u64,
    /// Result file for found codewords
    pub output: PathBuf,
    pub disable_progress: bool,
    pub permute_columns: bool,
    /// Code matrix file to search
    pub code_matrix: Option<PathBuf>,
    /// Codeword file to inspect
    pub codeword_file: Option<PathBuf>,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    /// File of per-column weights
    pub weights: Option<PathBuf>,
    /// The code matrix is a parity-check matrix
    pub parity_check: bool,
    /// Columns to force to zero before searching
    pub shorten: Vec<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            sigma: params.sigma,
            iterations: params.iterations,
            minimum: params.minimum_weight,
            output: PathBuf::from("default.cw"),
            disable_progress: !params.progress,
            permute_columns: params.permute_columns,
            code_matrix: None,
            codeword_file: None,
            seed: None,
            weights: None,
            parity_check: false,
            shorten: Vec::new(),
        }
    }
}

impl SearchConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            sigma: self.sigma,
            iterations: self.iterations,
            minimum_weight: self.minimum,
            permute_columns: self.permute_columns,
            progress: !self.disable_progress,
        }
    }

    /// Adds the file-related settings to a result file header.
    pub fn header_entries(&self, mut header: Header) -> Header {
        header = header
            .with_string("output", self.output.display().to_string())
            .with_integer("parity_check", u64::from(self.parity_check));
        if let Some(path) = &self.code_matrix {
            header = header.with_string("code_matrix", path.display().to_string());
        }
        if let Some(path) = &self.weights {
            header = header.with_string("weights", path.display().to_string());
        }
        if !self.shorten.is_empty() {
            let columns: Vec<String> = self.shorten.iter().map(usize::to_string).collect();
            header = header.with_string("shorten", columns.join(","));
        }
        header
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Could not serialize configuration")
    }
}

/// Settings given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_progress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permute_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_matrix: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeword_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parity_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shorten: Option<Vec<usize>>,
}

/// Builds the layered configuration without touching the file system.
pub fn figment(yaml: Option<&str>, overrides: &CliOverrides) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(SearchConfig::default()));
    if let Some(yaml) = yaml {
        figment = figment.merge(Yaml::string(yaml));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
}

/// Loads the configuration, reading the YAML file named on the command line or
/// the first `lowweight.config.yaml` found from the working directory upwards.
pub fn load_config(config_file: Option<PathBuf>, overrides: &CliOverrides) -> Result<SearchConfig> {
    let source = resolve_config_path(
        find_in_parent,
        std::env::current_dir()?,
        OsDirs::config_dir(),
        DEFAULT_CONFIG_NAME,
        config_file,
    );

    let yaml = match &source {
        ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => {
            info!(path = %path.display(), "Loading configuration");
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Configuration file {} not found", path.display()))?,
            )
        }
        ConfigSource::None => {
            debug!("No configuration file, using defaults");
            None
        }
    };

    let config: SearchConfig = figment(yaml.as_deref(), overrides)
        .extract()
        .context("Could not parse configuration")?;

    if config.sigma > lws_search::MAX_SIGMA {
        bail!(
            "sigma is too large: {} (the value must not exceed {})",
            config.sigma,
            lws_search::MAX_SIGMA
        );
    }
    Ok(config)
}
