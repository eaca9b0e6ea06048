use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::Error;

/// Clone a repository's default branch using a shallow clone
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// The clone lands in a temporary directory next to `target_dir` and is
/// renamed into place only once git succeeds, so a failed or interrupted
/// clone never leaves a partial tree at `target_dir`.
pub fn clone_shallow(url: &str, target_dir: &Path) -> Result<(), Error> {
    let parent = target_dir.parent().ok_or_else(|| Error::Path {
        message: format!("{} has no parent directory", target_dir.display()),
    })?;
    fs::create_dir_all(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".clone-")
        .tempdir_in(parent)?;
    let staged_tree = staging.path().join("tree");

    // Execute git clone --depth=1 <url> <staged_tree>
    let output = Command::new("git")
        .args(["clone", "--depth=1", "--quiet", url])
        .arg(&staged_tree)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository: SSH key in ssh-agent, \
                 git credentials or a personal access token"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr.trim().to_string(),
            hint,
        });
    }

    // Replace whatever a previous, interrupted run may have left behind
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }
    fs::rename(&staged_tree, target_dir)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clone_shallow_failure_leaves_no_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("owner").join("missing");
        let bogus_source = temp_dir.path().join("does-not-exist");

        let result = clone_shallow(&bogus_source.to_string_lossy(), &target);

        assert!(result.is_err());
        assert!(!target.exists());
        // The staging directory is cleaned up as well
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("owner"))
            .unwrap()
            .collect();
        assert!(leftovers.is_empty());
    }

    // Note: a successful clone requires a git repository to clone from, which
    // is covered by the gated integration tests.
}
