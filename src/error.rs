//! # Error Handling
//!
//! This module defines the centralized error type for the `colorswitch-build`
//! library. It uses `thiserror` to derive a single `Error` enum covering every
//! failure mode of a build, and a `Result<T>` alias used throughout the crate.
//!
//! The taxonomy mirrors the build pipeline:
//!
//! - Catalog errors abort before anything is fetched.
//! - Clone errors are raised by the working-tree provider; whether they abort
//!   the run is decided by the configured fetch-failure policy.
//! - Filesystem and I/O errors (copying trees, writing manifests) are fatal.
//! - Sync command errors only surface when the sync-failure policy is `abort`.
//!
//! Duplicate colors are never errors: they are resolved by the deduplicator
//! and logged.

use thiserror::Error;

/// Main error type for colorswitch-build operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repository catalog could not be read or is malformed.
    #[error("Catalog error in {source_name}: {message}")]
    Catalog {
        /// File path or other description of the catalog source
        source_name: String,
        message: String,
    },

    /// An error occurred while parsing the build configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while cloning a Git repository.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A working tree could not be materialized after every attempt.
    #[error("Failed to fetch {url} after {attempts} attempt(s): {message}")]
    Fetch {
        url: String,
        attempts: u32,
        message: String,
    },

    /// The submodule synchronization command failed and the configured
    /// policy escalates that failure.
    #[error("Sync command failed: {command} - {message}")]
    SyncCommand { command: String, message: String },

    /// An error occurred while copying or removing distribution content.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
