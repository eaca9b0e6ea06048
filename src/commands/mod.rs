//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `colorswitch-build` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that need a build configuration flatten [`ConfigArgs`], which
//! loads `colorswitch.yaml` and applies command-line overrides on top of it.

pub mod build;
pub mod clean;
pub mod completions;
pub mod ls;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use colorswitch_build::config::{self, BuildConfig};

/// Options shared by every command that reads the build configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the build configuration file.
    ///
    /// Defaults to `colorswitch.yaml` in the current directory; built-in
    /// defaults are used when that file does not exist.
    #[arg(short, long, value_name = "FILE", env = "COLORSWITCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository catalog file (YAML, or JSON with a `.json` extension)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Directory receiving merged folders and manifests
    #[arg(long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Directory holding cloned repositories
    #[arg(long, value_name = "DIR", env = "COLORSWITCH_SUBMODULE_ROOT")]
    pub submodule_root: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the configuration file and apply command-line overrides
    pub fn load(&self) -> Result<BuildConfig> {
        let mut config = config::load_or_default(self.config.as_deref()).with_context(|| {
            match &self.config {
                Some(path) => format!("Failed to load configuration {}", path.display()),
                None => "Failed to load configuration".to_string(),
            }
        })?;

        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(dist) = &self.dist {
            config.distribution_root = dist.clone();
        }
        if let Some(submodule_root) = &self.submodule_root {
            config.submodule_root = submodule_root.clone();
        }
        Ok(config)
    }
}
