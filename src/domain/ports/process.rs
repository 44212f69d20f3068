//! External Process Ports
//!
//! The repository importer and command triggers both run as subprocesses.
//! The application layer only sees these traits; infrastructure provides
//! the subprocess implementations.

use std::path::Path;

use crate::cancel::CancelToken;
use crate::domain::value_objects::Host;

/// Failure of an external process
#[derive(Debug)]
pub enum ProcessError {
    /// Executable could not be started
    Spawn { program: String, source: std::io::Error },
    /// Process exited unsuccessfully (`None` when killed by a signal)
    Exit { code: Option<i32> },
    /// Killed because the job was cancelled
    Cancelled,
    /// Output could not be read or the process could not be awaited
    Io(std::io::Error),
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn { program, source } => write!(f, "failed to start {}: {}", program, source),
            Self::Exit { code: Some(code) } => write!(f, "exited with status {}", code),
            Self::Exit { code: None } => write!(f, "terminated by signal"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Imports a staged package into one repository instance
pub trait PackageImporter: Send + Sync {
    /// Name of the importer (for logging)
    fn name(&self) -> &str;

    /// Import `package` into `host` below `destination`.
    ///
    /// Blocks until the import finishes; returns `Cancelled` if `cancel`
    /// fires first.
    fn import(
        &self,
        host: &Host,
        package: &Path,
        destination: &str,
        cancel: &CancelToken,
    ) -> Result<(), ProcessError>;
}

/// Runs a shell command for a command trigger
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str, working_dir: &Path, cancel: &CancelToken)
        -> Result<(), ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_display() {
        assert_eq!(
            ProcessError::Exit { code: Some(2) }.to_string(),
            "exited with status 2"
        );
        assert_eq!(
            ProcessError::Exit { code: None }.to_string(),
            "terminated by signal"
        );
    }

    #[test]
    fn spawn_has_source() {
        use std::error::Error;
        let err = ProcessError::Spawn {
            program: "vlt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "failed to start vlt: not found");
    }
}
