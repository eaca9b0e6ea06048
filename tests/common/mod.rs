//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and catalog snippets to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_catalog(catalogs::SINGLE)
//!         .with_tree("morhetz/gruvbox", &["colors/gruvbox.vim"]);
//!     // ... test code
//! }
//! ```
//!
//! Trees seeded with [`TestFixture::with_tree`] land where the build expects
//! an existing clone, so no test here needs network access.

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    #[allow(unused_imports)]
    pub use super::should_skip_network_tests;
    pub use super::TestFixture;
}

/// Common catalog YAML snippets for testing.
#[allow(dead_code)]
pub mod catalogs {
    /// One repository.
    pub const SINGLE: &str = r#"
- url: morhetz/gruvbox
  stars: 12000
"#;

    /// Two repositories defining `gruvbox`; the second has more stars.
    pub const CONFLICT: &str = r#"
- url: morhetz/gruvbox
  priority: 1
  stars: 100
- url: sainnhe/gruvbox-material
  priority: 1
  stars: 500
"#;

    /// A repository listed twice.
    pub const DUPLICATE_URL: &str = r#"
- url: morhetz/gruvbox
- url: morhetz/gruvbox
"#;

    /// Empty catalog.
    pub const EMPTY: &str = "[]\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "- url: [unterminated\n";
}

/// Check if network tests should be skipped.
///
/// Returns `true` if the `SKIP_NETWORK_TESTS` environment variable is set.
#[allow(dead_code)]
pub fn should_skip_network_tests() -> bool {
    env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// A test fixture that provides a temporary build directory.
///
/// The directory plays the role of the distribution root: it holds the
/// catalog as `repositories.yaml`, cloned trees under `submodule/`, and
/// receives the merged folders and manifests.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_catalog(catalogs::SINGLE)
///     .with_tree("morhetz/gruvbox", &["colors/gruvbox.vim"]);
///
/// fixture.command().args(["build", "--skip-sync"]).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `repositories.yaml` catalog with the given content.
    pub fn with_catalog(self, content: &str) -> Self {
        self.with_file("repositories.yaml", content)
    }

    /// Add a `colorswitch.yaml` build configuration with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("colorswitch.yaml", content)
    }

    /// Seed an already cloned repository under `submodule/<dir>` containing
    /// the given files.
    pub fn with_tree(self, dir: &str, files: &[&str]) -> Self {
        let root = self.temp_dir.child("submodule").child(dir);
        root.create_dir_all()
            .expect("Failed to create tree directory");
        for file in files {
            root.child(file)
                .write_str(&format!("\" {}\n", file))
                .expect("Failed to write tree file");
        }
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to a manifest file.
    #[allow(dead_code)]
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("lua/colorswitch").join(name)
    }

    /// Read a manifest file.
    #[allow(dead_code)]
    pub fn read_manifest(&self, name: &str) -> String {
        std::fs::read_to_string(self.manifest_path(name)).expect("Failed to read manifest")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    ///
    /// `COLORSWITCH_CONFIG` and `COLORSWITCH_SUBMODULE_ROOT` are cleared so a
    /// developer's environment cannot leak into the run.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("colorswitch-build");
        cmd.current_dir(self.path())
            .env_remove("COLORSWITCH_CONFIG")
            .env_remove("COLORSWITCH_SUBMODULE_ROOT")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_tree() {
        let fixture = TestFixture::new().with_tree("o/r", &["colors/a.vim", "autoload/a.vim"]);
        assert!(fixture.path().join("submodule/o/r/colors/a.vim").exists());
        assert!(fixture.path().join("submodule/o/r/autoload/a.vim").exists());
    }

    #[test]
    fn test_catalogs_are_valid_yaml() {
        let catalogs = [
            catalogs::SINGLE,
            catalogs::CONFLICT,
            catalogs::DUPLICATE_URL,
            catalogs::EMPTY,
        ];
        for catalog in catalogs {
            let result: Result<serde_yaml::Value, _> = serde_yaml::from_str(catalog);
            assert!(result.is_ok(), "Catalog should be valid YAML: {}", catalog);
        }
    }
}
