//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists every color the
//! distribution would ship together with the repository that owns it.
//!
//! ## Functionality
//!
//! - **Ownership Listing**: One line per color, in name order
//! - **Conflict Filter**: `--conflicts` limits the output to colors defined by
//!   more than one repository and names the losing contenders
//! - **JSON Output**: `--json` for scripting
//!
//! This command runs the fetch and dedup phases only. Missing repositories are
//! still cloned into the submodule root, but the distribution root is never
//! modified.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;

use colorswitch_build::catalog::FileCatalog;
use colorswitch_build::phases::orchestrator::{self, Resolution};
use colorswitch_build::repository::WorkingTreeProvider;

use super::ConfigArgs;

/// List every color with the repository that owns it
#[derive(Args, Debug, Default)]
pub struct LsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only show colors defined by more than one repository
    #[arg(long)]
    pub conflicts: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// One listed color
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ColorOwnership {
    pub color: String,
    pub owner: String,
    /// Other repositories defining the same color, in catalog order
    pub contenders: Vec<String>,
}

/// Build the listing from a resolution
pub fn ownership(resolution: &Resolution, conflicts_only: bool) -> Vec<ColorOwnership> {
    let mut definers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for tree in &resolution.fetched.trees {
        for color in &tree.colors {
            definers
                .entry(color.as_str())
                .or_default()
                .push(tree.record.url.as_str());
        }
    }

    resolution
        .assignment
        .iter()
        .map(|(color, owner)| ColorOwnership {
            color: color.to_string(),
            owner: owner.url.clone(),
            contenders: definers
                .get(color)
                .map(|urls| {
                    urls.iter()
                        .filter(|url| **url != owner.url)
                        .map(|url| url.to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .filter(|entry| !conflicts_only || !entry.contenders.is_empty())
        .collect()
}

/// Execute the ls command
pub fn execute(args: LsArgs) -> Result<()> {
    let config = args.config.load()?;

    if !config.catalog.exists() {
        anyhow::bail!("Catalog file not found: {}", config.catalog.display());
    }

    let catalog = FileCatalog::new(&config.catalog);
    let provider = WorkingTreeProvider::new(config.submodule_root.clone())
        .color_extensions(config.color_extensions.clone())
        .clone_attempts(config.clone_attempts);

    let resolution = orchestrator::execute_resolve(&config, &catalog, &provider)?;
    let listing = ownership(&resolution, args.conflicts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        if args.conflicts {
            println!("No duplicate colors");
        } else {
            println!("No colors found");
        }
        return Ok(());
    }

    let width = listing.iter().map(|e| e.color.len()).max().unwrap_or(0);
    for entry in &listing {
        if entry.contenders.is_empty() {
            println!("{:width$}  {}", entry.color, entry.owner, width = width);
        } else {
            println!(
                "{:width$}  {}  (over {})",
                entry.color,
                entry.owner,
                entry.contenders.join(", "),
                width = width
            );
        }
    }

    Ok(())
}
