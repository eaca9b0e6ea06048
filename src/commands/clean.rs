//! # Clean Command Implementation
//!
//! Removes the generated parts of the distribution: every merge folder and the
//! two manifests. With `--all` the submodule root is removed as well, so the
//! next build clones every repository again.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;

use colorswitch_build::phases::manifest::{CANDIDATES_FILENAME, SUBMODULES_FILENAME};
use colorswitch_build::phases::merge;
use colorswitch_build::repository::WorkingTreeProvider;

use super::ConfigArgs;

/// Arguments for the clean command
#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Also remove every cloned repository
    #[arg(long)]
    pub all: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the clean command
pub fn execute(args: CleanArgs) -> Result<()> {
    let config = args.config.load()?;

    merge::clean(&config.distribution_root, &config.merge_folders)?;

    let manifest_dir = config.manifest_path();
    for name in [SUBMODULES_FILENAME, CANDIDATES_FILENAME] {
        let path = manifest_dir.join(name);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    if args.all {
        WorkingTreeProvider::new(config.submodule_root.clone()).wipe()?;
    }

    if !args.quiet {
        println!(
            "🧹 Cleaned {}{}",
            config.distribution_root.display(),
            if args.all { " and cloned repositories" } else { "" }
        );
    }
    Ok(())
}
