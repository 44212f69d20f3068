//! Test environment for isolated Lookout runs.
//!
//! Provides `TestEnv` - a temp checkout plus helpers to run the Lookout CLI
//! inside it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a Lookout CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated checkout in a temp directory
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create temp checkout"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_lookout")),
        }
    }

    /// Get path relative to the checkout root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file (creating parent directories) and return its path
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap_or_default()
    }

    /// Run lookout from the checkout root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run lookout from the checkout root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        // Staging directories land inside the checkout and go away with it
        let tmp = self.path("tmp");
        fs::create_dir_all(&tmp).expect("Failed to create temp directory");

        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env("TMPDIR", &tmp)
            .env_remove("LOOKOUT_VLT")
            .env_remove("LOOKOUT_INSTANCES")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("Failed to execute lookout"))
    }

    /// Install a stand-in importer that appends its arguments and the staged
    /// filter to `vlt.log`, then exits with `exit_code`.
    #[cfg(unix)]
    pub fn fake_vlt(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let log = self.path("vlt.log");
        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{log}'\n\
             cat \"$6/META-INF/vault/filter.xml\" >> '{log}'\n\
             find \"$6/jcr_root\" -type f | sed \"s|$6/||\" | sort >> '{log}'\n\
             exit {exit_code}\n",
            log = log.display(),
        );
        let path = self.write("bin/vlt", &script);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake vlt executable");
        path
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Run lookout with no checkout (for `--help` style checks)
pub fn run_bare(args: &[&str], cwd: &Path) -> TestResult {
    let output = Command::new(env!("CARGO_BIN_EXE_lookout"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to execute lookout");
    to_result(output)
}
