//! Orchestrator for the complete build
//!
//! This module coordinates all phases. The catalog and the working-tree
//! provider are passed in explicitly so callers (and tests) decide where
//! repositories come from and how they are fetched.

use log::info;

use super::dedup::{self, Assignment};
use super::{fetch, manifest, merge, sync, BuildReport, FetchOutcome};
use crate::catalog::RepositoryCatalog;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::repository::WorkingTreeProvider;

/// Trees and color ownership after Phases 1-2
#[derive(Debug, Clone)]
pub struct Resolution {
    pub fetched: FetchOutcome,
    pub assignment: Assignment,
    /// Number of records the catalog supplied
    pub repositories: usize,
}

/// Execute Phases 1-2: fetch every repository and resolve color ownership
pub fn execute_resolve(
    config: &BuildConfig,
    catalog: &dyn RepositoryCatalog,
    provider: &WorkingTreeProvider,
) -> Result<Resolution> {
    let records = catalog.get_all()?;
    info!("Catalog lists {} repositories", records.len());

    // Phase 1: Fetch
    let fetched = fetch::execute(&records, provider, config.fetch_failure)?;

    // Phase 2: Dedup
    let assignment = dedup::resolve(&fetched.trees);
    info!(
        "{} colors owned by {} repositories",
        assignment.len(),
        assignment.winning_set().len()
    );

    Ok(Resolution {
        fetched,
        assignment,
        repositories: records.len(),
    })
}

/// Execute the complete build (Phases 1-5)
///
/// This orchestrates the complete pipeline:
/// 1. Materialize every catalog repository
/// 2. Resolve duplicate colors
/// 3. Clean merge destinations and merge every winner
/// 4. Run the submodule sync command
/// 5. Write the manifests
pub fn execute_build(
    config: &BuildConfig,
    catalog: &dyn RepositoryCatalog,
    provider: &WorkingTreeProvider,
) -> Result<BuildReport> {
    let Resolution {
        fetched,
        assignment,
        repositories,
    } = execute_resolve(config, catalog, provider)?;
    let winning_set = assignment.winning_set();

    // Phase 3: Merge
    let winners = fetched
        .trees
        .iter()
        .filter(|tree| winning_set.contains(&tree.record.url));
    let files_copied = merge::execute(winners, &config.distribution_root, &config.merge_folders)?;

    // Phase 4: Sync
    let sync = sync::execute(
        &config.sync_command,
        &config.distribution_root,
        config.sync_failure,
    )?;

    // Phase 5: Manifest
    let manifests = manifest::execute(&assignment, &fetched.trees, &config.manifest_path())?;

    Ok(BuildReport {
        repositories,
        winners: winning_set.iter().map(|repo| repo.url.clone()).collect(),
        skipped: fetched.skipped,
        colors: assignment.len(),
        files_copied,
        sync,
        manifests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RepositoryRecord, StaticCatalog};
    use crate::config::FetchFailurePolicy;
    use crate::error::Error;
    use crate::phases::SyncOutcome;
    use crate::repository::tests::MockGitOperations;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(root: &Path) -> BuildConfig {
        BuildConfig {
            catalog: root.join("repositories.yaml"),
            submodule_root: root.join("submodule"),
            distribution_root: root.join("dist"),
            sync_command: Vec::new(),
            ..BuildConfig::default()
        }
    }

    fn seed_tree(root: &Path, url: &str, files: &[&str]) {
        let tree = root.join("submodule").join(url);
        for file in files {
            let path = tree.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, url).unwrap();
        }
    }

    #[test]
    fn test_execute_build_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        seed_tree(root, "r1/ab", &["colors/a.vim", "colors/b.vim", "autoload/ab.vim"]);
        seed_tree(root, "r2/b", &["colors/b.lua", "lua/b/init.lua"]);
        seed_tree(root, "r3/lost", &["colors/a.vim", "doc/lost.txt"]);

        let catalog = StaticCatalog::new(vec![
            RepositoryRecord::new("r1/ab", 1, 10),
            RepositoryRecord::new("r2/b", 2, 1),
            RepositoryRecord::new("r3/lost", 0, 999),
        ]);
        let mock = MockGitOperations::new(&[]);
        let clone_calls = std::sync::Arc::clone(&mock.clone_calls);
        let provider = WorkingTreeProvider::with_operations(Box::new(mock), root.join("submodule"));
        let config = config(root);

        let report = execute_build(&config, &catalog, &provider).unwrap();

        assert!(clone_calls.lock().unwrap().is_empty());
        assert_eq!(report.repositories, 3);
        assert_eq!(report.winners, vec!["r1/ab", "r2/b"]);
        assert_eq!(report.colors, 2);
        assert_eq!(report.sync, SyncOutcome::Skipped);

        let dist = root.join("dist");
        // The winner of 'b' overwrote r1's copy
        assert_eq!(fs::read_to_string(dist.join("colors/a.vim")).unwrap(), "r1/ab");
        assert_eq!(fs::read_to_string(dist.join("colors/b.vim")).unwrap(), "r1/ab");
        assert!(dist.join("colors/b.lua").exists());
        assert!(dist.join("lua/b/init.lua").exists());
        // Losers contribute nothing
        assert!(!dist.join("doc/lost.txt").exists());

        let candidates = fs::read_to_string(&report.manifests.candidates).unwrap();
        assert_eq!(candidates, "-- Candidates\nreturn {\n    'a',\n    'b',\n}\n");
        let submodules = fs::read_to_string(&report.manifests.submodules).unwrap();
        assert!(submodules.contains("['a']={"));
        assert!(submodules.contains("submodule/r2/b/lua'"));
        assert!(!submodules.contains("r3/lost"));
        assert_eq!(
            report.manifests.submodules,
            dist.join("lua/colorswitch/submodules.lua")
        );
    }

    #[test]
    fn test_execute_build_fetches_missing_trees() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let catalog = StaticCatalog::new(vec![RepositoryRecord::new("morhetz/gruvbox", 1, 1)]);
        let provider = WorkingTreeProvider::with_operations(
            Box::new(MockGitOperations::new(&["colors/gruvbox.vim"])),
            root.join("submodule"),
        );

        let report = execute_build(&config(root), &catalog, &provider).unwrap();

        assert_eq!(report.winners, vec!["morhetz/gruvbox"]);
        assert!(root.join("dist/colors/gruvbox.vim").exists());
    }

    #[test]
    fn test_execute_build_aborts_on_fetch_failure() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let catalog = StaticCatalog::new(vec![RepositoryRecord::new("broken/theme", 1, 1)]);
        let provider = WorkingTreeProvider::with_operations(
            Box::new(MockGitOperations::failing_first(&[], 10)),
            root.join("submodule"),
        );

        let error = execute_build(&config(root), &catalog, &provider).unwrap_err();

        assert!(matches!(error, Error::Fetch { .. }));
        assert!(!root.join("dist/lua/colorswitch").exists());
    }

    #[test]
    fn test_execute_build_skips_failed_fetch_when_configured() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        seed_tree(root, "good/theme", &["colors/good.vim"]);
        let catalog = StaticCatalog::new(vec![
            RepositoryRecord::new("broken/theme", 1, 1),
            RepositoryRecord::new("good/theme", 1, 1),
        ]);
        let provider = WorkingTreeProvider::with_operations(
            Box::new(MockGitOperations::failing_first(&[], 10)),
            root.join("submodule"),
        );
        let config = BuildConfig {
            fetch_failure: FetchFailurePolicy::Skip,
            ..config(root)
        };

        let report = execute_build(&config, &catalog, &provider).unwrap();

        assert_eq!(report.skipped, vec!["broken/theme"]);
        assert_eq!(report.winners, vec!["good/theme"]);
    }

    #[test]
    fn test_execute_build_rejects_bad_catalog_before_fetching() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let catalog = StaticCatalog::new(vec![
            RepositoryRecord::new("dup/theme", 1, 1),
            RepositoryRecord::new("dup/theme", 2, 2),
        ]);
        let mock = MockGitOperations::new(&["colors/x.vim"]);
        let clone_calls = std::sync::Arc::clone(&mock.clone_calls);
        let provider = WorkingTreeProvider::with_operations(Box::new(mock), root.join("submodule"));

        let error = execute_build(&config(root), &catalog, &provider).unwrap_err();

        assert!(matches!(error, Error::Catalog { .. }));
        assert!(clone_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_resolve_rejects_hosts_sharing_a_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let catalog = StaticCatalog::new(vec![
            RepositoryRecord::new("https://github.com/a/theme", 1, 1),
            RepositoryRecord::new("https://gitlab.com/a/theme", 1, 1),
        ]);
        let mock = MockGitOperations::new(&["colors/x.vim"]);
        let clone_calls = std::sync::Arc::clone(&mock.clone_calls);
        let provider = WorkingTreeProvider::with_operations(Box::new(mock), root.join("submodule"));

        let error = execute_resolve(&config(root), &catalog, &provider).unwrap_err();

        assert!(matches!(error, Error::Catalog { .. }));
        assert!(clone_calls.lock().unwrap().is_empty());
        assert!(!root.join("submodule/a/theme").exists());
    }

    #[test]
    fn test_execute_resolve_does_not_touch_distribution() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        seed_tree(root, "r1/theme", &["colors/x.vim"]);
        let catalog = StaticCatalog::new(vec![RepositoryRecord::new("r1/theme", 1, 1)]);
        let provider = WorkingTreeProvider::with_operations(
            Box::new(MockGitOperations::new(&[])),
            root.join("submodule"),
        );

        let resolution = execute_resolve(&config(root), &catalog, &provider).unwrap();

        assert_eq!(resolution.assignment.owner("x").unwrap().url, "r1/theme");
        assert!(!root.join("dist").exists());
    }
}
