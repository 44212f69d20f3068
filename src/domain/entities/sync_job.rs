//! Change batches and the sync jobs derived from them

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{Host, RepositoryPath};

/// Changed paths from one coalescing window, de-duplicated in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    paths: Vec<PathBuf>,
}

impl ChangeBatch {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        let paths = paths
            .into_iter()
            .map(Into::into)
            .filter(|p: &PathBuf| seen.insert(p.clone()))
            .collect();
        Self { paths }
    }

    /// Keep only paths matching the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(&Path) -> bool) {
        self.paths.retain(|p| keep(p));
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// One filesystem change to package and import into every host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    /// Changed file or directory on disk
    pub filesystem_path: PathBuf,
    /// Repository path the change maps to
    pub repository_path: RepositoryPath,
    /// Instances to import into
    pub hosts: Vec<Host>,
    /// Convert `*.json` sources to `.content.xml` before import
    pub sling_initial_content: bool,
}

impl SyncJob {
    pub fn new(
        filesystem_path: impl Into<PathBuf>,
        repository_path: RepositoryPath,
        hosts: Vec<Host>,
    ) -> Self {
        Self {
            filesystem_path: filesystem_path.into(),
            repository_path,
            hosts,
            sling_initial_content: false,
        }
    }

    pub fn with_sling_initial_content(mut self, enabled: bool) -> Self {
        self.sling_initial_content = enabled;
        self
    }
}
