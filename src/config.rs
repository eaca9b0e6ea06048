//! # Build Configuration
//!
//! This module defines `BuildConfig`, the settings that steer a distribution
//! build, and the logic for loading it from a `colorswitch.yaml` file.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! configuration that reproduces the standard layout:
//!
//! ```yaml
//! catalog: repositories.yaml
//! submodule_root: submodule
//! distribution_root: .
//! manifest_dir: lua/colorswitch
//! merge_folders: [autoload, colors, doc, lua, after, src, tests]
//! color_extensions: [vim, lua]
//! clone_attempts: 2
//! fetch_failure: abort   # or: skip
//! sync_command: [git, submodule, update, --init, --remote]
//! sync_failure: warn     # or: abort
//! ```
//!
//! Relative paths are resolved by the caller against its working directory.
//! Unknown keys are rejected so that typos do not silently fall back to
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// What to do when a repository's working tree cannot be materialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Fail the whole build
    #[default]
    Abort,
    /// Log a warning and leave the repository out of color consideration
    Skip,
}

/// What to do when the submodule sync command fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncFailurePolicy {
    /// Log the exit status and continue
    #[default]
    Warn,
    /// Fail the build
    Abort,
}

/// Settings for one distribution build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Path of the repository catalog file
    pub catalog: PathBuf,
    /// Directory holding materialized working trees
    pub submodule_root: PathBuf,
    /// Directory receiving merged folders
    pub distribution_root: PathBuf,
    /// Directory, relative to the distribution root, receiving the manifests
    pub manifest_dir: PathBuf,
    /// Subfolders copied from each winning repository, in order
    pub merge_folders: Vec<String>,
    /// File extensions recognized as theme files inside `colors/`
    pub color_extensions: Vec<String>,
    /// How many times a clone is attempted before giving up
    pub clone_attempts: u32,
    pub fetch_failure: FetchFailurePolicy,
    /// Command run in the distribution root after merging; empty disables it
    pub sync_command: Vec<String>,
    pub sync_failure: SyncFailurePolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(defaults::DEFAULT_CATALOG_FILENAME),
            submodule_root: PathBuf::from(defaults::DEFAULT_SUBMODULE_ROOT),
            distribution_root: PathBuf::from("."),
            manifest_dir: PathBuf::from(defaults::DEFAULT_MANIFEST_DIR),
            merge_folders: defaults::MERGE_FOLDERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            color_extensions: defaults::COLOR_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            clone_attempts: defaults::DEFAULT_CLONE_ATTEMPTS,
            fetch_failure: FetchFailurePolicy::default(),
            sync_command: defaults::SYNC_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sync_failure: SyncFailurePolicy::default(),
        }
    }
}

impl BuildConfig {
    /// Absolute or working-directory-relative path of the manifest directory
    pub fn manifest_path(&self) -> PathBuf {
        self.distribution_root.join(&self.manifest_dir)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.clone_attempts == 0 {
            return Err(Error::ConfigParse {
                message: "clone_attempts must be at least 1".to_string(),
                hint: None,
            });
        }
        if self.color_extensions.is_empty() {
            return Err(Error::ConfigParse {
                message: "color_extensions must not be empty".to_string(),
                hint: Some("The defaults are [vim, lua]".to_string()),
            });
        }
        for ext in &self.color_extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(Error::ConfigParse {
                    message: format!("invalid color extension '{}'", ext),
                    hint: Some("Write extensions without the leading dot".to_string()),
                });
            }
        }
        for folder in &self.merge_folders {
            let path = Path::new(folder);
            if folder.is_empty() || path.components().count() != 1 || path.is_absolute() {
                return Err(Error::ConfigParse {
                    message: format!("invalid merge folder '{}'", folder),
                    hint: Some("Merge folders are single directory names".to_string()),
                });
            }
            if folder == "." || folder == ".." || folder == ".git" {
                return Err(Error::ConfigParse {
                    message: format!("merge folder '{}' is not allowed", folder),
                    hint: None,
                });
            }
        }
        Ok(())
    }
}

/// Parse a build configuration from YAML
pub fn parse(yaml: &str) -> Result<BuildConfig> {
    if yaml.trim().is_empty() {
        return Ok(BuildConfig::default());
    }

    let config: BuildConfig = serde_yaml::from_str(yaml).map_err(|e| {
        let message = e.to_string();
        let hint = if message.contains("unknown field") {
            Some(
                "Known fields: catalog, submodule_root, distribution_root, manifest_dir, \
                 merge_folders, color_extensions, clone_attempts, fetch_failure, \
                 sync_command, sync_failure"
                    .to_string(),
            )
        } else if message.contains("unknown variant") {
            Some("fetch_failure accepts abort|skip, sync_failure accepts warn|abort".to_string())
        } else {
            None
        };
        Error::ConfigParse { message, hint }
    })?;

    config.validate()?;
    Ok(config)
}

/// Load a build configuration from a file
pub fn from_file(path: &Path) -> Result<BuildConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}

/// Load a configuration, falling back to defaults when `path` is the default
/// file name and it does not exist.
///
/// An explicitly requested file that is missing is still an error.
pub fn load_or_default(path: Option<&Path>) -> Result<BuildConfig> {
    match path {
        Some(path) => from_file(path),
        None => {
            let default_path = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
            if default_path.is_file() {
                from_file(default_path)
            } else {
                log::debug!(
                    "No {} found, using default configuration",
                    defaults::DEFAULT_CONFIG_FILENAME
                );
                Ok(BuildConfig::default())
            }
        }
    }
}
