//! Implementation of the phases of a distribution build.
//!
//! ## Overview
//!
//! A build follows 5 phases:
//! 1. Fetch - Materialize every catalog repository, in catalog order
//! 2. Dedup - Decide which repository owns each color name
//! 3. Merge - Copy the winners' recognized folders into the distribution root
//! 4. Sync - Run the submodule synchronization command
//! 5. Manifest - Write `submodules.lua` and `candidates.lua`
//!
//! Phases 1-2 are read-only with respect to the distribution root, which lets
//! the `ls` command reuse them through [`orchestrator::execute_resolve`].

use std::path::PathBuf;

use crate::repository::WorkingTree;

// Phase modules
pub mod dedup;
pub mod fetch;
pub mod manifest;
pub mod merge;
pub mod orchestrator;
pub mod sync;

/// Result of Phase 1
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Materialized trees in catalog order
    pub trees: Vec<WorkingTree>,
    /// Urls left out under the `skip` fetch-failure policy
    pub skipped: Vec<String>,
}

/// Result of Phase 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No command configured
    Skipped,
    Succeeded,
    /// The command failed and the policy let the build continue
    Failed(String),
}

/// Files written by Phase 5
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPaths {
    pub submodules: PathBuf,
    pub candidates: PathBuf,
}

/// Summary of a completed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Records supplied by the catalog
    pub repositories: usize,
    /// Urls of repositories owning at least one color
    pub winners: Vec<String>,
    pub skipped: Vec<String>,
    /// Number of distinct colors shipped
    pub colors: usize,
    pub files_copied: usize,
    pub sync: SyncOutcome,
    pub manifests: ManifestPaths,
}
