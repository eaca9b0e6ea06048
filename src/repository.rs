//! # Working-Tree Provider
//!
//! This module provides the `WorkingTreeProvider`, which guarantees that a
//! local, readable source tree exists for a catalog record and reports the
//! color names that tree defines.
//!
//! ## Design
//!
//! Git access sits behind the **`GitOperations`** trait so the provider can be
//! exercised in tests without network access. `DefaultGitOperations` wraps the
//! system `git` command; tests substitute a mock that writes fixture trees.
//!
//! Materialization is idempotent on two levels:
//!
//! - **On disk**: a record whose target directory already exists below the
//!   submodule root and is not empty is not fetched again. An empty directory
//!   (an uninitialized submodule) is fetched into.
//! - **In process**: each result is memoized in a `TreeCache`, so repeated
//!   lookups of the same url during one build return the same `WorkingTree`.
//!
//! Clones are retried up to the configured number of attempts.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::cache::TreeCache;
use crate::catalog::RepositoryRecord;
use crate::error::{Error, Result};

/// Name of the folder whose files define a repository's colors
pub const COLORS_DIR: &str = "colors";

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Shallow-clones `url` into `target_dir`.
    ///
    /// Implementations must not leave a partial tree at `target_dir` when
    /// they fail.
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, target_dir)
    }
}

/// A materialized repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingTree {
    pub record: RepositoryRecord,
    /// Root of the tree on local storage
    pub path: PathBuf,
    /// Color names defined under `colors/`
    pub colors: BTreeSet<String>,
}

/// True when `path` is a directory with at least one entry
fn is_populated(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Lists the color names defined by a tree.
///
/// A color name is the file stem of a regular file directly inside `colors/`
/// whose extension is one of `extensions`. Files with other extensions are
/// ignored. A missing or unreadable `colors/` folder yields an empty set.
pub fn list_colors(tree_root: &Path, extensions: &[String]) -> BTreeSet<String> {
    let colors_dir = tree_root.join(COLORS_DIR);
    let entries = match fs::read_dir(&colors_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("No readable colors folder in {}: {}", tree_root.display(), e);
            return BTreeSet::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let ext = path.extension()?.to_str()?;
            if !extensions.iter().any(|known| known == ext) {
                return None;
            }
            let stem = path.file_stem()?.to_str()?;
            if stem.is_empty() {
                None
            } else {
                Some(stem.to_string())
            }
        })
        .collect()
}

/// Materializes catalog records as local working trees
pub struct WorkingTreeProvider {
    git_ops: Box<dyn GitOperations>,
    submodule_root: PathBuf,
    color_extensions: Vec<String>,
    clone_attempts: u32,
    cache: TreeCache,
}

impl WorkingTreeProvider {
    /// Creates a provider backed by the system `git` command
    pub fn new(submodule_root: PathBuf) -> Self {
        Self::with_operations(Box::new(DefaultGitOperations), submodule_root)
    }

    /// Creates a provider with a custom `GitOperations` implementation.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(git_ops: Box<dyn GitOperations>, submodule_root: PathBuf) -> Self {
        Self {
            git_ops,
            submodule_root,
            color_extensions: crate::defaults::COLOR_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            clone_attempts: crate::defaults::DEFAULT_CLONE_ATTEMPTS,
            cache: TreeCache::new(),
        }
    }

    /// Sets the extensions recognized as theme files
    pub fn color_extensions(mut self, extensions: Vec<String>) -> Self {
        self.color_extensions = extensions;
        self
    }

    /// Sets how many clone attempts are made per repository (at least one)
    pub fn clone_attempts(mut self, attempts: u32) -> Self {
        self.clone_attempts = attempts.max(1);
        self
    }

    pub fn submodule_root(&self) -> &Path {
        &self.submodule_root
    }

    /// Where the working tree of `record` lives
    pub fn tree_path(&self, record: &RepositoryRecord) -> Result<PathBuf> {
        Ok(self.submodule_root.join(record.relative_dir()?))
    }

    /// Checks whether a tree for `record` is already present on disk
    ///
    /// An empty directory does not count: it is what an uninitialized git
    /// submodule looks like.
    pub fn is_materialized(&self, record: &RepositoryRecord) -> bool {
        self.tree_path(record)
            .map(|path| is_populated(&path))
            .unwrap_or(false)
    }

    /// Ensures a working tree exists for `record` and lists its colors.
    pub fn materialize(&self, record: &RepositoryRecord) -> Result<WorkingTree> {
        self.cache.get_or_process(&record.url, || {
            let path = self.tree_path(record)?;

            if is_populated(&path) {
                debug!("Using existing tree for {} at {}", record.url, path.display());
            } else {
                if path.is_dir() {
                    info!("{} is empty, fetching {}", path.display(), record.url);
                }
                self.fetch(record, &path)?;
            }

            let colors = list_colors(&path, &self.color_extensions);
            debug!("{} defines {} color(s)", record.url, colors.len());

            Ok(WorkingTree {
                record: record.clone(),
                path,
                colors,
            })
        })
    }

    fn fetch(&self, record: &RepositoryRecord, path: &Path) -> Result<()> {
        let clone_url = record.clone_url();
        let mut last_error = None;

        for attempt in 1..=self.clone_attempts {
            info!(
                "Cloning {} into {} (attempt {}/{})",
                clone_url,
                path.display(),
                attempt,
                self.clone_attempts
            );
            match self.git_ops.clone_shallow(&clone_url, path) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!("Clone of {} failed: {}", clone_url, e);
                    last_error = Some(e);
                }
            }
        }

        Err(Error::Fetch {
            url: record.url.clone(),
            attempts: self.clone_attempts,
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt was made".to_string()),
        })
    }

    /// Removes every materialized tree, forcing the next build to re-clone
    pub fn wipe(&self) -> Result<()> {
        if self.submodule_root.exists() {
            info!("Removing {}", self.submodule_root.display());
            fs::remove_dir_all(&self.submodule_root)?;
        }
        self.cache.clear()
    }
}
