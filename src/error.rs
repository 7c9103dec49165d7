//! # Error Handling
//!
//! This module defines the centralized error type for `gut-build`. It uses the
//! `thiserror` library to describe every failure the mirror and rewrite steps
//! can surface, each carrying enough context to tell which path or command
//! was involved.
//!
//! The variants map onto four failure classes:
//!
//! - **Provisioning**: a working directory could not be created.
//! - **Identity mismatch**: a checkout's remote did not match the expected
//!   repository, so the destructive reset was refused.
//! - **Transport/tool**: a `git` invocation could not be started or exited
//!   with a failure status.
//! - **Rewrite I/O**: a listing, read, write or rename failed while walking
//!   the tree.
//!
//! Configuration parsing errors and wrapped I/O and YAML errors round out the
//! enum. None of these are retried; a failed step is reported as-is and a
//! later run is expected to converge the tree.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gut-build operations
#[derive(Error, Debug)]
pub enum Error {
    /// A working directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checkout at `path` does not point at the expected repository.
    ///
    /// Returned before any reset or clean runs, so nothing in the working
    /// copy has been touched.
    #[error(
        "Refusing to reset {}: its remotes do not mention {expected} (is this the wrong repository?)",
        path.display()
    )]
    WrongRepository {
        path: PathBuf,
        expected: String,
        /// Raw `git remote -v` output, kept for diagnostics.
        remotes: String,
    },

    /// A `git` command ran but exited unsuccessfully.
    #[error("Git command failed in {}: git {command} (exit {}) - {stderr}", dir.display(), status.map(|s| s.to_string()).unwrap_or_else(|| "signal".to_string()))]
    GitCommand {
        command: String,
        dir: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    /// A `git` command could not be started at all.
    #[error("Failed to run git {command}: {source}")]
    GitLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed while rewriting a tree.
    #[error("Rewrite failed at {}: {source}", path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration or policy file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
