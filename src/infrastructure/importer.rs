//! Vault command-line importer
//!
//! Imports a staged package with
//! `vlt --credentials user:password -v import <repository url> <package> <destination>`.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::cancel::CancelToken;
use crate::domain::ports::{PackageImporter, ProcessError};
use crate::domain::value_objects::Host;

use super::terminal::run_streamed;

/// Default importer executable, looked up on `PATH`
pub const DEFAULT_VLT: &str = "vlt";

/// Importer backed by the `vlt` executable
#[derive(Debug, Clone)]
pub struct VltImporter {
    executable: OsString,
}

impl Default for VltImporter {
    fn default() -> Self {
        Self::new(DEFAULT_VLT)
    }
}

impl VltImporter {
    pub fn new(executable: impl Into<OsString>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// The full command line for one import
    pub fn command(&self, host: &Host, package: &Path, destination: &str) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--credentials")
            .arg(host.credentials())
            .arg("-v")
            .arg("import")
            .arg(host.repository_url())
            .arg(package)
            .arg(destination);
        cmd
    }
}

impl PackageImporter for VltImporter {
    fn name(&self) -> &str {
        "vlt"
    }

    fn import(
        &self,
        host: &Host,
        package: &Path,
        destination: &str,
        cancel: &CancelToken,
    ) -> Result<(), ProcessError> {
        run_streamed(self.command(host, package, destination), cancel)
    }
}
