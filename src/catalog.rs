//! # Repository Catalog
//!
//! The catalog is the leaf of the build pipeline: it supplies the ordered set
//! of candidate colorscheme repositories together with the metadata the
//! deduplicator ranks them by.
//!
//! ## Key Components
//!
//! - **`RepositoryRecord`**: Immutable descriptor of one candidate repository.
//!   Equality and hashing use the `url` alone.
//! - **`RepositoryCatalog`**: Trait implemented by every catalog source. The
//!   orchestrator receives a catalog as an explicit dependency.
//! - **`FileCatalog`**: Reads records from a YAML file (or JSON when the file
//!   extension is `.json`).
//! - **`StaticCatalog`**: Holds records in memory, for embedders and tests.
//!
//! ## File Format
//!
//! ```yaml
//! - url: morhetz/gruvbox
//!   priority: 100
//!   stars: 13000
//!   last_update: 2023-08-01T00:00:00Z
//! - url: folke/tokyonight.nvim
//!   priority: 100
//!   stars: 6000
//! ```
//!
//! `priority` and `stars` default to zero. A missing `last_update` means the
//! timestamp is unknown, which the deduplicator treats specially.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path;

/// Immutable descriptor of one candidate repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Source location, either an `owner/name` shorthand or a clone URL.
    /// Unique across a catalog.
    pub url: String,
    /// Author-assigned rank, higher is preferred
    #[serde(default)]
    pub priority: i64,
    /// Popularity signal, first tie-break after priority
    #[serde(default)]
    pub stars: u64,
    /// Last known change, second tie-break after stars
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl RepositoryRecord {
    pub fn new(url: impl Into<String>, priority: i64, stars: u64) -> Self {
        Self {
            url: url.into(),
            priority,
            stars,
            last_update: None,
        }
    }

    /// Builder-style setter for the last update timestamp
    pub fn with_last_update(mut self, last_update: DateTime<Utc>) -> Self {
        self.last_update = Some(last_update);
        self
    }

    /// The URL handed to `git clone`
    pub fn clone_url(&self) -> String {
        path::clone_url(&self.url)
    }

    /// Location of this repository's working tree relative to the submodule root
    pub fn relative_dir(&self) -> Result<PathBuf> {
        path::repo_relative_dir(&self.url)
    }
}

impl PartialEq for RepositoryRecord {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for RepositoryRecord {}

impl Hash for RepositoryRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for RepositoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (priority: {}, stars: {}, last_update: ",
            self.url, self.priority, self.stars
        )?;
        match &self.last_update {
            Some(ts) => write!(f, "{})", ts.to_rfc3339()),
            None => write!(f, "unknown)"),
        }
    }
}

/// Source of the full, ordered set of candidate repositories
pub trait RepositoryCatalog: Send + Sync {
    /// Returns every known repository, in catalog order.
    fn get_all(&self) -> Result<Vec<RepositoryRecord>>;
}

/// Catalog backed by a YAML or JSON file on disk
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl RepositoryCatalog for FileCatalog {
    fn get_all(&self) -> Result<Vec<RepositoryRecord>> {
        let source_name = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| Error::Catalog {
            source_name: source_name.clone(),
            message: format!("cannot read catalog: {}", e),
        })?;

        let records = if self.is_json() {
            parse_json(&content)
        } else {
            parse_yaml(&content)
        }
        .map_err(|e| Error::Catalog {
            source_name: source_name.clone(),
            message: e.to_string(),
        })?;

        validate(&source_name, &records)?;
        log::debug!("Loaded {} repositories from {}", records.len(), source_name);
        Ok(records)
    }
}

/// Catalog holding its records in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<RepositoryRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<RepositoryRecord>) -> Self {
        Self { records }
    }
}

impl RepositoryCatalog for StaticCatalog {
    fn get_all(&self) -> Result<Vec<RepositoryRecord>> {
        validate("static catalog", &self.records)?;
        Ok(self.records.clone())
    }
}

/// Parse catalog records from YAML
pub fn parse_yaml(content: &str) -> Result<Vec<RepositoryRecord>> {
    // An empty document is an empty catalog
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Parse catalog records from JSON
pub fn parse_json(content: &str) -> Result<Vec<RepositoryRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Reject catalogs with duplicated or unusable identities
fn validate(source_name: &str, records: &[RepositoryRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut dirs: HashMap<PathBuf, &str> = HashMap::new();
    for record in records {
        if record.url.trim().is_empty() {
            return Err(Error::Catalog {
                source_name: source_name.to_string(),
                message: "repository with an empty url".to_string(),
            });
        }
        if !seen.insert(record.url.as_str()) {
            return Err(Error::Catalog {
                source_name: source_name.to_string(),
                message: format!("duplicate url '{}'", record.url),
            });
        }
        let dir = record.relative_dir().map_err(|e| Error::Catalog {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        if let Some(other) = dirs.insert(dir.clone(), record.url.as_str()) {
            return Err(Error::Catalog {
                source_name: source_name.to_string(),
                message: format!(
                    "'{}' and '{}' would share the working tree '{}'",
                    other,
                    record.url,
                    dir.display()
                ),
            });
        }
    }
    Ok(())
}
