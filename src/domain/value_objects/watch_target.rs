//! Watch target value object
//!
//! One independently monitored filesystem location and what a change there
//! triggers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::RepositoryPath;

/// Coalescing window for package targets
pub const PACKAGE_LATENCY: Duration = Duration::from_millis(100);

/// Coalescing window for command targets (builds are slow, batch harder)
pub const COMMAND_LATENCY: Duration = Duration::from_millis(1000);

/// What a watched location syncs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// A vault package `jcr_root` directory
    VaultPackageRoot { filesystem_root: PathBuf },
    /// A Sling-Initial-Content source tree mapped onto a repository path
    SlingInitialContentMapping {
        filesystem_root: PathBuf,
        repository_root: RepositoryPath,
    },
    /// Run a shell command when anything under `watch_path` changes
    CommandTrigger {
        watch_path: PathBuf,
        working_dir: PathBuf,
        command: String,
    },
}

impl WatchTarget {
    /// The directory handed to the file watcher
    pub fn watch_path(&self) -> &Path {
        match self {
            WatchTarget::VaultPackageRoot { filesystem_root } => filesystem_root,
            WatchTarget::SlingInitialContentMapping {
                filesystem_root, ..
            } => filesystem_root,
            WatchTarget::CommandTrigger { watch_path, .. } => watch_path,
        }
    }

    pub fn default_latency(&self) -> Duration {
        match self {
            WatchTarget::VaultPackageRoot { .. }
            | WatchTarget::SlingInitialContentMapping { .. } => PACKAGE_LATENCY,
            WatchTarget::CommandTrigger { .. } => COMMAND_LATENCY,
        }
    }

    /// Same target with its watch root replaced (used after canonicalizing)
    pub fn with_watch_path(self, path: PathBuf) -> Self {
        match self {
            WatchTarget::VaultPackageRoot { .. } => WatchTarget::VaultPackageRoot {
                filesystem_root: path,
            },
            WatchTarget::SlingInitialContentMapping {
                repository_root, ..
            } => WatchTarget::SlingInitialContentMapping {
                filesystem_root: path,
                repository_root,
            },
            WatchTarget::CommandTrigger {
                working_dir,
                command,
                ..
            } => WatchTarget::CommandTrigger {
                watch_path: path,
                working_dir,
                command,
            },
        }
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchTarget::VaultPackageRoot { filesystem_root } => {
                write!(f, "jcr_root at {}", filesystem_root.display())
            }
            WatchTarget::SlingInitialContentMapping {
                filesystem_root,
                repository_root,
            } => write!(
                f,
                "Sling-Initial-Content at {} -> {}",
                filesystem_root.display(),
                repository_root
            ),
            WatchTarget::CommandTrigger {
                watch_path,
                command,
                ..
            } => write!(f, "{} (runs {:?})", watch_path.display(), command),
        }
    }
}

/// A configured target plus its coalescing window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSpec {
    pub target: WatchTarget,
    pub latency: Duration,
}

impl WatchSpec {
    pub fn new(target: WatchTarget) -> Self {
        let latency = target.default_latency();
        Self { target, latency }
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        if let Some(latency) = latency {
            self.latency = latency;
        }
        self
    }
}
