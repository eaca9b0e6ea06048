//! Phase 5: Emitting Manifests
//!
//! The last phase writes the two Lua tables the plugin runtime loads:
//!
//! - `submodules.lua` maps every color to the paths of the repository that
//!   owns it: each direct, non-hidden subdirectory followed by the tree root.
//! - `candidates.lua` lists every color name.
//!
//! ```text
//! -- Submodules
//! return {
//!     ['gruvbox']={'submodule/morhetz/gruvbox/autoload','submodule/morhetz/gruvbox'},
//! }
//! ```
//!
//! Only colors a repository owns in the [`Assignment`] are emitted, so each
//! color appears exactly once. Paths always use forward slashes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;

use super::dedup::Assignment;
use super::ManifestPaths;
use crate::defaults::MANIFEST_INDENT;
use crate::error::{Error, Result};
use crate::path::to_forward_slashes;
use crate::repository::WorkingTree;

pub const SUBMODULES_FILENAME: &str = "submodules.lua";
pub const CANDIDATES_FILENAME: &str = "candidates.lua";

/// One emitted color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub color: String,
    /// Forward-slash paths of the owning tree
    pub paths: Vec<String>,
}

/// Quote a string as a single-quoted Lua literal
pub fn lua_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

/// Paths exposed for a tree: non-hidden subdirectories in name order, then
/// the root itself
pub fn tree_paths(tree_root: &Path) -> Result<Vec<String>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(tree_root).map_err(|e| Error::Filesystem {
        message: format!("cannot list {}: {}", tree_root.display(), e),
    })? {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.path().is_dir() {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();

    let mut paths: Vec<String> = subdirs.iter().map(|p| to_forward_slashes(p)).collect();
    paths.push(to_forward_slashes(tree_root));
    Ok(paths)
}

/// Build manifest entries for every winner, in winning-set order
pub fn collect(assignment: &Assignment, trees: &[WorkingTree]) -> Result<Vec<ManifestEntry>> {
    let by_url: HashMap<&str, &WorkingTree> = trees
        .iter()
        .map(|tree| (tree.record.url.as_str(), tree))
        .collect();

    let mut entries = Vec::new();
    for winner in assignment.winning_set().iter() {
        let tree = by_url.get(winner.url.as_str()).ok_or_else(|| Error::Path {
            message: format!("no working tree for winning repository {}", winner.url),
        })?;
        let paths = tree_paths(&tree.path)?;
        for color in assignment.colors_of(&winner.url) {
            entries.push(ManifestEntry {
                color: color.to_string(),
                paths: paths.clone(),
            });
        }
    }
    Ok(entries)
}

/// Render the color -> paths table
pub fn render_submodules(entries: &[ManifestEntry]) -> String {
    let mut out = String::from("-- Submodules\nreturn {\n");
    for entry in entries {
        let paths: Vec<String> = entry.paths.iter().map(|p| lua_quote(p)).collect();
        out.push_str(&format!(
            "{}[{}]={{{}}},\n",
            MANIFEST_INDENT,
            lua_quote(&entry.color),
            paths.join(",")
        ));
    }
    out.push_str("}\n");
    out
}

/// Render the flat color name list
pub fn render_candidates(entries: &[ManifestEntry]) -> String {
    let mut out = String::from("-- Candidates\nreturn {\n");
    for entry in entries {
        out.push_str(&format!("{}{},\n", MANIFEST_INDENT, lua_quote(&entry.color)));
    }
    out.push_str("}\n");
    out
}

/// Execute Phase 5: write both manifests into `manifest_dir`
pub fn execute(
    assignment: &Assignment,
    trees: &[WorkingTree],
    manifest_dir: &Path,
) -> Result<ManifestPaths> {
    let entries = collect(assignment, trees)?;

    fs::create_dir_all(manifest_dir)?;
    let submodules = manifest_dir.join(SUBMODULES_FILENAME);
    let candidates = manifest_dir.join(CANDIDATES_FILENAME);

    write_file(&submodules, &render_submodules(&entries))?;
    write_file(&candidates, &render_candidates(&entries))?;

    info!(
        "Wrote {} colors to {} and {}",
        entries.len(),
        submodules.display(),
        candidates.display()
    );
    Ok(ManifestPaths {
        submodules,
        candidates,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("cannot write {}: {}", path.display(), e),
    })
}
