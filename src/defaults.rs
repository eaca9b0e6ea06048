//! Default values for colorswitch-build configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Configuration file looked up in the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "colorswitch.yaml";

/// Repository catalog file name.
pub const DEFAULT_CATALOG_FILENAME: &str = "repositories.yaml";

/// Directory holding materialized working trees.
///
/// Generated manifests reference paths below this directory, so it is kept
/// relative to the distribution root by default.
pub const DEFAULT_SUBMODULE_ROOT: &str = "submodule";

/// Directory, relative to the distribution root, receiving the manifests.
pub const DEFAULT_MANIFEST_DIR: &str = "lua/colorswitch";

/// Subfolders copied from each winning repository into the distribution.
pub const MERGE_FOLDERS: &[&str] = &["autoload", "colors", "doc", "lua", "after", "src", "tests"];

/// Theme file extensions recognized inside a repository's `colors/` folder.
pub const COLOR_EXTENSIONS: &[&str] = &["vim", "lua"];

/// Command run after merging to bring submodules up to date.
pub const SYNC_COMMAND: &[&str] = &["git", "submodule", "update", "--init", "--remote"];

/// Number of clone attempts per repository.
pub const DEFAULT_CLONE_ATTEMPTS: u32 = 2;

/// Indentation of every manifest entry.
pub const MANIFEST_INDENT: &str = "    ";
