//! Package assembly
//!
//! Turns one `SyncJob` into a staged vault package the importer can read.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
#[cfg(not(unix))]
use tracing::warn;

use crate::cancel::CancelToken;
use crate::domain::entities::{filter_xml, settings_xml, PackageDescriptor, SyncJob};
use crate::domain::services::{convert_tree, flatten_sling_json_path, normalize_descriptor_path};
use crate::domain::value_objects::RepositoryPath;
use crate::error::{LookoutError, LookoutResult, PackageBuildError};

/// Prefix of every staging directory
pub const STAGING_PREFIX: &str = "vlt-sync";

/// Builds staging directories for sync jobs
#[derive(Debug, Clone, Default)]
pub struct PackageBuilder {
    staging_parent: Option<PathBuf>,
}

impl PackageBuilder {
    /// Stage packages in the system temp directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage packages under `parent` instead of the system temp directory
    pub fn with_staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }

    /// Assemble the package for `job`.
    ///
    /// The staging directory outlives the builder; on failure it is left
    /// in place and named in the error.
    pub fn build(&self, job: &SyncJob, cancel: &CancelToken) -> LookoutResult<PackageDescriptor> {
        let staging = self.create_staging()?;
        debug!(
            "Staging {} for {} in {}",
            job.filesystem_path.display(),
            job.repository_path,
            staging.display()
        );

        match assemble(job, &staging, cancel) {
            Ok(filter_roots) => Ok(PackageDescriptor::new(staging, filter_roots)),
            Err(source) => Err(LookoutError::PackageBuild { staging, source }),
        }
    }

    fn create_staging(&self) -> LookoutResult<PathBuf> {
        let parent = self
            .staging_parent
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        match tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&parent)
        {
            Ok(dir) => Ok(dir.keep()),
            Err(source) => Err(LookoutError::PackageBuild {
                staging: parent.clone(),
                source: PackageBuildError::Io {
                    action: "create staging directory in",
                    path: parent,
                    source,
                },
            }),
        }
    }
}

fn assemble(
    job: &SyncJob,
    staging: &Path,
    cancel: &CancelToken,
) -> Result<Vec<RepositoryPath>, PackageBuildError> {
    let node = job.repository_path.node_path(job.sling_initial_content);
    let parent = node.parent().ok_or(PackageBuildError::RepositoryRoot)?;
    // Name of the changed entry once descriptors collapse to their directory
    let entry_name = job
        .repository_path
        .node_path(false)
        .name()
        .map(str::to_string)
        .ok_or(PackageBuildError::RepositoryRoot)?;

    let package = PackageDescriptor::new(staging.to_path_buf(), vec![node]);
    let target = package.jcr_root().join(parent.relative());
    create_dir(&target)?;

    let primary = normalize_descriptor_path(&job.filesystem_path);
    let content_paths = if job.sling_initial_content {
        flatten_sling_json_path(&primary)
    } else {
        vec![primary.clone()]
    };

    for source in content_paths {
        if !source.exists() {
            debug!("{} no longer exists; syncing its removal", source.display());
            continue;
        }
        let name = if source == primary {
            PathBuf::from(&entry_name)
        } else {
            match source.file_name() {
                Some(name) => PathBuf::from(name),
                None => continue,
            }
        };
        copy_recursive(&source, &target.join(name), cancel)?;
    }

    let vault_dir = package.vault_dir();
    create_dir(&vault_dir)?;
    checkpoint(cancel)?;
    write_file(&vault_dir.join("settings.xml"), &settings_xml())?;
    checkpoint(cancel)?;
    write_file(
        &vault_dir.join("filter.xml"),
        &filter_xml(package.filter_roots()),
    )?;

    if job.sling_initial_content {
        checkpoint(cancel)?;
        convert_tree(&package.jcr_root())?;
    }

    Ok(package.filter_roots().to_vec())
}

fn checkpoint(cancel: &CancelToken) -> Result<(), PackageBuildError> {
    if cancel.is_cancelled() {
        Err(PackageBuildError::Cancelled)
    } else {
        Ok(())
    }
}

/// Copy a file or directory tree, checking for cancellation before each entry.
///
/// Symlinks are copied as links, never followed.
fn copy_recursive(source: &Path, dest: &Path, cancel: &CancelToken) -> Result<(), PackageBuildError> {
    checkpoint(cancel)?;

    let metadata = fs::symlink_metadata(source).map_err(io_err("stat", source))?;
    if metadata.file_type().is_symlink() {
        return copy_link(source, dest);
    }
    if !metadata.is_dir() {
        fs::copy(source, dest).map_err(io_err("copy", source))?;
        return Ok(());
    }

    create_dir(dest)?;
    let mut entries = fs::read_dir(source)
        .map_err(io_err("read directory", source))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err("read directory", source))?;
    entries.sort();

    for entry in entries {
        if let Some(name) = entry.file_name() {
            copy_recursive(&entry, &dest.join(name), cancel)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(source: &Path, dest: &Path) -> Result<(), PackageBuildError> {
    let link = fs::read_link(source).map_err(io_err("read link", source))?;
    std::os::unix::fs::symlink(link, dest).map_err(io_err("create link", dest))
}

#[cfg(not(unix))]
fn copy_link(source: &Path, _dest: &Path) -> Result<(), PackageBuildError> {
    warn!("Skipping symlink {}", source.display());
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), PackageBuildError> {
    fs::create_dir_all(path).map_err(io_err("create directory", path))
}

fn write_file(path: &Path, contents: &str) -> Result<(), PackageBuildError> {
    fs::write(path, contents).map_err(io_err("write", path))
}

fn io_err(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> PackageBuildError {
    let path = path.to_path_buf();
    move |source| PackageBuildError::Io {
        action,
        path,
        source,
    }
}
