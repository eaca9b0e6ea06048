//! Path manipulation utilities for colorswitch-build

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Host used to expand `owner/name` shorthands into clone URLs
pub const DEFAULT_GIT_HOST: &str = "https://github.com";

/// Returns true when `location` is a full URL or scp-style remote rather than
/// an `owner/name` shorthand.
pub fn is_remote_url(location: &str) -> bool {
    location.contains("://") || is_scp_like(location)
}

fn is_scp_like(location: &str) -> bool {
    // git@github.com:owner/name.git
    match (location.find('@'), location.find(':')) {
        (Some(at), Some(colon)) => at < colon && !location.contains("://"),
        _ => false,
    }
}

/// Expand a repository location into something `git clone` accepts
pub fn clone_url(location: &str) -> String {
    if is_remote_url(location) {
        location.to_string()
    } else {
        format!("{}/{}", DEFAULT_GIT_HOST, location.trim_matches('/'))
    }
}

/// Convert a repository location into a relative directory below the
/// submodule root.
///
/// Shorthands map to themselves (`owner/name`). Full URLs drop the scheme,
/// host and a trailing `.git`, so `https://github.com/owner/name.git` also maps
/// to `owner/name`.
pub fn repo_relative_dir(location: &str) -> Result<PathBuf> {
    let raw_path = if location.contains("://") {
        let url = Url::parse(location)?;
        url.path().to_string()
    } else if is_scp_like(location) {
        // is_scp_like guarantees a ':' is present
        location
            .split_once(':')
            .map(|(_, path)| path.to_string())
            .unwrap_or_default()
    } else {
        location.to_string()
    };

    let trimmed = raw_path.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let mut relative = PathBuf::new();
    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        match Path::new(segment).components().next() {
            Some(Component::Normal(_)) if segment != "." && segment != ".." => {
                relative.push(segment)
            }
            _ => {
                return Err(Error::Path {
                    message: format!(
                        "Repository location '{}' contains an unsafe path segment '{}'",
                        location, segment
                    ),
                })
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(Error::Path {
            message: format!("Repository location '{}' has no path", location),
        });
    }

    Ok(relative)
}

/// Render a path with forward slashes regardless of host platform
pub fn to_forward_slashes(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if rendered.contains('\\') {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}
