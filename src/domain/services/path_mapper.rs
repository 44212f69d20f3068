//! Filesystem path to repository path mapping
//!
//! Vault package checkouts mirror the repository under a directory named
//! `jcr_root`; Sling-Initial-Content trees are mapped explicitly from a
//! filesystem root to a repository root.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::JCR_ROOT_DIR;
use crate::domain::value_objects::{
    ContentKind, ContentPath, RepositoryPath, WatchTarget, DESCRIPTOR_FILE_NAME,
};

/// A filesystem path with no repository counterpart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathResolutionError {
    #[error("{} has no {} ancestor", path.display(), JCR_ROOT_DIR)]
    NoJcrRoot { path: PathBuf },

    #[error("{} is outside {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Repository path of a file or directory inside a vault package checkout.
///
/// Everything up to and including the nearest ancestor named `jcr_root` is
/// stripped. The `jcr_root` directory itself is not an ancestor of itself and
/// fails like any other unmapped path.
pub fn resolve_repository_path(path: &Path) -> Result<RepositoryPath, PathResolutionError> {
    let root = path
        .ancestors()
        .skip(1)
        .find(|ancestor| ancestor.file_name().map(|n| n == JCR_ROOT_DIR).unwrap_or(false))
        .ok_or_else(|| PathResolutionError::NoJcrRoot {
            path: path.to_path_buf(),
        })?;

    let relative = path
        .strip_prefix(root)
        .map_err(|_| PathResolutionError::NoJcrRoot {
            path: path.to_path_buf(),
        })?;
    Ok(RepositoryPath::from_relative(relative))
}

/// A descriptor stands in for its directory
pub fn normalize_descriptor_path(path: &Path) -> PathBuf {
    let is_descriptor = path
        .file_name()
        .map(|n| n.to_string_lossy().ends_with(DESCRIPTOR_FILE_NAME))
        .unwrap_or(false);
    match path.parent() {
        Some(parent) if is_descriptor => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// A `foo.json` source together with its `foo/` directory, whichever exist.
///
/// Paths not ending in `.json` are returned as-is.
pub fn flatten_sling_json_path(path: &Path) -> Vec<PathBuf> {
    let content = match ContentPath::parse(path) {
        Ok(content) if content.kind() == ContentKind::JsonSource => content,
        _ => return vec![path.to_path_buf()],
    };

    let mut paths = vec![content.as_path().to_path_buf()];
    paths.extend(content.expanded_dir());
    paths.retain(|p| p.exists());
    paths
}

/// Resolves changed paths for one watch target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMapper {
    /// Paths resolve through their `jcr_root` ancestor
    VaultPackage,
    /// Paths resolve relative to a fixed filesystem root
    SlingInitialContent {
        filesystem_root: PathBuf,
        repository_root: RepositoryPath,
    },
}

impl PathMapper {
    /// Mapper for a target; command triggers have none
    pub fn for_target(target: &WatchTarget) -> Option<Self> {
        match target {
            WatchTarget::VaultPackageRoot { .. } => Some(PathMapper::VaultPackage),
            WatchTarget::SlingInitialContentMapping {
                filesystem_root,
                repository_root,
            } => Some(PathMapper::SlingInitialContent {
                filesystem_root: filesystem_root.clone(),
                repository_root: repository_root.clone(),
            }),
            WatchTarget::CommandTrigger { .. } => None,
        }
    }

    pub fn resolve(&self, path: &Path) -> Result<RepositoryPath, PathResolutionError> {
        match self {
            PathMapper::VaultPackage => resolve_repository_path(path),
            PathMapper::SlingInitialContent {
                filesystem_root,
                repository_root,
            } => {
                let relative = path.strip_prefix(filesystem_root).map_err(|_| {
                    PathResolutionError::OutsideRoot {
                        path: path.to_path_buf(),
                        root: filesystem_root.clone(),
                    }
                })?;
                Ok(repository_root.join(relative))
            }
        }
    }

    pub fn is_sling_initial_content(&self) -> bool {
        matches!(self, PathMapper::SlingInitialContent { .. })
    }
}
