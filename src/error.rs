//! Error type for docsync library operations.
//!
//! Only fatal conditions live here. Recoverable findings (malformed documentation entries, unmatched anchors,
//! inconsistencies between sources and docs) are returned as data alongside successful results.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal errors that abort a docsync run.
#[derive(Debug, Error, Diagnostic)]
pub enum SyncError {
    #[error("{}", missing_message(.paths))]
    #[diagnostic(
        code(docsync::missing_artifact),
        help("run from the repository root or pass --root")
    )]
    MissingArtifact { paths: Vec<PathBuf> },

    #[error("I/O error on '{}': {source}", .path.display())]
    #[diagnostic(code(docsync::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document '{}': {message}", .path.display())]
    #[diagnostic(code(docsync::document))]
    Document { path: PathBuf, message: String },

    #[error("invalid pattern for rule {rule}: {source}")]
    #[diagnostic(code(docsync::invalid_pattern))]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration '{}': {message}", .path.display())]
    #[diagnostic(code(docsync::config))]
    Config { path: PathBuf, message: String },

    #[error("'{}' is being regenerated by another docsync process", .path.display())]
    #[diagnostic(
        code(docsync::target_locked),
        help("wait for the other run to finish; concurrent runs against the same files are rejected")
    )]
    TargetLocked { path: PathBuf },

    #[error("{}", unmatched_message(.missing))]
    #[diagnostic(
        code(docsync::unmatched_anchor),
        help("restore the anchor lines, or run without --strict to regenerate the remaining lists")
    )]
    UnmatchedAnchor { missing: Vec<(PathBuf, String)> },

    #[error("failed to replace '{}': {source}", .path.display())]
    #[diagnostic(code(docsync::persist))]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

fn missing_message(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}' doesn't exist, or isn't a file", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unmatched_message(missing: &[(PathBuf, String)]) -> String {
    missing
        .iter()
        .map(|(path, anchor)| format!("anchor {anchor:?} not found in '{}'", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result alias for docsync library operations.
pub type SyncResult<T> = Result<T, SyncError>;
