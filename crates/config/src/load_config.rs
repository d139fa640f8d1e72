// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::{Path, PathBuf};

use path_clean::clean;

pub const DEFAULT_CONFIG_NAME: &str = "lowweight.config.yaml";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Looks for `filename` in `path` and each of its ancestors.
pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// Where the configuration file should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line; must exist
    Explicit(PathBuf),
    /// Found by searching; used only if present
    Discovered(PathBuf),
    /// Nothing to load, defaults apply
    None,
}

/// Resolves the configuration file.
///
/// A file given on the command line wins (relative paths are taken from `cwd`).
/// Otherwise `default_filename` is searched from `cwd` upwards and finally in
/// `default_config_dir`.
pub fn resolve_config_path<P: Into<PathBuf>>(
    find_in_parent: FindInParent,
    cwd: P,
    default_config_dir: Option<P>,
    default_filename: &str,
    cli_file: Option<P>,
) -> ConfigSource {
    let cwd = cwd.into();

    if let Some(cli_file) = cli_file.map(Into::into) {
        if cli_file.is_absolute() {
            return ConfigSource::Explicit(cli_file);
        }
        return ConfigSource::Explicit(clean(cwd.join(cli_file)));
    }

    if let Some(found) = find_in_parent(&cwd, default_filename) {
        return ConfigSource::Discovered(found);
    }

    match default_config_dir.map(Into::into) {
        Some(dir) => {
            let candidate = clean(dir.join(default_filename));
            if candidate.exists() {
                ConfigSource::Discovered(candidate)
            } else {
                ConfigSource::None
            }
        }
        None => ConfigSource::None,
    }
}

pub struct OsDirs;

impl OsDirs {
    /// Per-user configuration directory, if the platform has one.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lowweight"))
    }
}
