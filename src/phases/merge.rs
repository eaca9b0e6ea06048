//! Phase 3: Merging Winning Trees
//!
//! This phase copies the recognized subfolders (`autoload`, `colors`, `doc`,
//! `lua`, `after`, `src`, `tests` by default) of every winning repository into
//! the distribution root.
//!
//! ## Process
//!
//! 1.  **Clean**: Every merge destination under the distribution root is
//!     removed first, so content from repositories that no longer win does not
//!     linger between builds.
//!
//! 2.  **Copy**: For each winner, each recognized subfolder that exists is
//!     copied recursively into the same-named folder of the distribution root.
//!     Files at matching relative paths are overwritten; unrelated files are
//!     left alone. `.git` entries are never copied.

use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::repository::WorkingTree;

/// Remove every merge destination under `distribution_root`
pub fn clean(distribution_root: &Path, merge_folders: &[String]) -> Result<()> {
    for folder in merge_folders {
        let target = distribution_root.join(folder);
        if target.is_dir() {
            debug!("Removing {}", target.display());
            fs::remove_dir_all(&target).map_err(|e| Error::Filesystem {
                message: format!("cannot remove {}: {}", target.display(), e),
            })?;
        }
    }
    Ok(())
}

/// Copy the recognized subfolders of `tree` into `distribution_root`
///
/// Returns the number of files copied.
pub fn merge_tree(
    tree: &WorkingTree,
    distribution_root: &Path,
    merge_folders: &[String],
) -> Result<usize> {
    let mut copied = 0;
    for folder in merge_folders {
        let source_dir = tree.path.join(folder);
        if !source_dir.is_dir() {
            continue;
        }
        let target_dir = distribution_root.join(folder);
        info!(
            "merge {} into {}",
            source_dir.display(),
            target_dir.display()
        );
        copied += copy_tree(&source_dir, &target_dir)?;
    }
    Ok(copied)
}

/// Execute Phase 3: clean destinations, then merge every winner once
pub fn execute<'a, I>(winners: I, distribution_root: &Path, merge_folders: &[String]) -> Result<usize>
where
    I: IntoIterator<Item = &'a WorkingTree>,
{
    clean(distribution_root, merge_folders)?;

    let mut copied = 0;
    for tree in winners {
        copied += merge_tree(tree, distribution_root, merge_folders)?;
    }
    info!("Merged {} files into {}", copied, distribution_root.display());
    Ok(copied)
}

/// Recursively copy `source` into `target`, overwriting matching files
fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    let mut copied = 0;
    let walker = WalkDir::new(source)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("cannot walk {}: {}", source.display(), e),
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::Path {
                message: format!("{} is outside {}: {}", entry.path().display(), source.display(), e),
            })?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &destination).map_err(|e| Error::Filesystem {
                message: format!(
                    "cannot copy {} to {}: {}",
                    entry.path().display(),
                    destination.display(),
                    e
                ),
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}
