//! # Colorswitch Build Library
//!
//! This library assembles a colorscheme distribution from many independent
//! git repositories. Several repositories often ship a color with the same
//! name; the library decides, deterministically, which one owns it, copies the
//! winners' runtime folders into one tree and writes the Lua manifests a
//! color switching plugin loads.
//!
//! ## Quick Example
//!
//! ```
//! use colorswitch_build::catalog::RepositoryRecord;
//! use colorswitch_build::phases::dedup::{preferred, resolve};
//! use colorswitch_build::repository::WorkingTree;
//! use std::path::PathBuf;
//!
//! let popular = RepositoryRecord::new("morhetz/gruvbox", 1, 13000);
//! let fork = RepositoryRecord::new("someone/gruvbox", 1, 12);
//! assert!(preferred(&popular, &fork));
//!
//! let trees = vec![
//!     WorkingTree {
//!         record: fork,
//!         path: PathBuf::from("submodule/someone/gruvbox"),
//!         colors: ["gruvbox".to_string()].into_iter().collect(),
//!     },
//!     WorkingTree {
//!         record: popular,
//!         path: PathBuf::from("submodule/morhetz/gruvbox"),
//!         colors: ["gruvbox".to_string()].into_iter().collect(),
//!     },
//! ];
//! let assignment = resolve(&trees);
//! assert_eq!(assignment.owner("gruvbox").unwrap().url, "morhetz/gruvbox");
//! assert_eq!(assignment.winning_set().len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Catalog (`catalog`)**: The ordered list of candidate repositories with
//!   their priority, star count and last update time.
//! - **Working trees (`repository`, `git`, `cache`)**: Cloning repositories
//!   below the submodule root, idempotently, and listing their colors.
//! - **Phases (`phases`)**: The build pipeline, from fetching to writing the
//!   manifests. The deduplication rules live in `phases::dedup`.
//! - **Configuration (`config`, `defaults`)**: Paths and failure policies.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute_build`:
//!
//! 1.  **Fetch**: Materialize every catalog repository, in catalog order.
//! 2.  **Dedup**: Assign every color name to exactly one repository.
//! 3.  **Merge**: Copy the winners' recognized folders into the distribution.
//! 4.  **Sync**: Run the submodule synchronization command.
//! 5.  **Manifest**: Write `submodules.lua` and `candidates.lua`.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod path;
pub mod phases;
pub mod repository;

#[cfg(test)]
mod path_proptest;
