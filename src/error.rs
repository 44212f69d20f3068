//! Error types for Lookout
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ProcessError;
use crate::domain::services::{PathResolutionError, SerializeError};

/// Result type alias for Lookout operations
pub type LookoutResult<T> = Result<T, LookoutError>;

/// Main error type for Lookout operations
#[derive(Error, Debug)]
pub enum LookoutError {
    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A watch target or command entry is missing required keys
    #[error("{section} entry is malformed (requires {required}): {entry}")]
    MalformedEntry {
        section: &'static str,
        required: &'static str,
        entry: String,
    },

    /// Host connection URL could not be parsed
    #[error("invalid instance url '{url}': {reason}")]
    InvalidHost { url: String, reason: String },

    /// No `jcr_root` ancestor or path outside a mapping
    #[error(transparent)]
    PathResolution(#[from] PathResolutionError),

    /// JSON to XML conversion failed
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// Package assembly failed; the staging directory is left in place
    #[error("failed to build package at {staging}: {source}")]
    PackageBuild {
        staging: PathBuf,
        #[source]
        source: PackageBuildError,
    },

    /// Import failed on some hosts
    #[error("sync failed on {} host(s): {}", failed.len(), failed.join(", "))]
    PartialSyncFailure { failed: Vec<String> },

    /// Command trigger exited unsuccessfully
    #[error("command `{command}` failed: {source}")]
    Command {
        command: String,
        #[source]
        source: ProcessError,
    },

    /// File watcher could not be set up
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Job was superseded by a newer change batch
    #[error("job cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookoutError {
    /// Cancellation is a normal outcome for a superseded job, not a failure
    pub fn is_cancelled(&self) -> bool {
        match self {
            LookoutError::Cancelled => true,
            LookoutError::PackageBuild { source, .. } => {
                matches!(source, PackageBuildError::Cancelled)
            }
            LookoutError::Command { source, .. } => matches!(source, ProcessError::Cancelled),
            _ => false,
        }
    }
}

/// Cause of a failed package build
#[derive(Error, Debug)]
pub enum PackageBuildError {
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// The change maps onto `/`; importing it would replace every node
    #[error("refusing to replace the repository root")]
    RepositoryRoot,

    #[error("build cancelled")]
    Cancelled,
}
