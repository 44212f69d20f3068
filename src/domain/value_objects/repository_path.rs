//! Repository Path Value Object
//!
//! An absolute, `/`-separated path addressing a node in the content
//! repository. Independent of the host platform's path separator.

use std::fmt;
use std::path::{Component, Path};

use super::content_path::{DESCRIPTOR_FILE_NAME, JSON_SUFFIX};

/// Absolute repository path (always starts with `/`, never ends with one
/// unless it is the root)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryPath(String);

impl RepositoryPath {
    /// The repository root `/`
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalize a repository path string: leading slash added, empty and
    /// `.` segments dropped.
    pub fn new(path: impl AsRef<str>) -> Self {
        let segments: Vec<&str> = path
            .as_ref()
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        Self(format!("/{}", segments.join("/")))
    }

    /// Build from a relative filesystem path (components joined with `/`)
    pub fn from_relative(relative: &Path) -> Self {
        Self::root().join(relative)
    }

    /// Append a relative filesystem path
    pub fn join(&self, relative: &Path) -> Self {
        let mut joined = self.0.clone();
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                if !joined.ends_with('/') {
                    joined.push('/');
                }
                joined.push_str(&segment.to_string_lossy());
            }
        }
        Self::new(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path without its leading slash, as used under `jcr_root/`
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            None
        } else {
            self.0.rsplit('/').next()
        }
    }

    pub fn parent(&self) -> Option<RepositoryPath> {
        if self.is_root() {
            return None;
        }
        let (parent, _) = self.0.rsplit_once('/')?;
        Some(Self::new(parent))
    }

    /// The node a change under this path belongs to.
    ///
    /// A descriptor maps to its parent node; with Sling-Initial-Content a
    /// `foo.json` source maps to node `foo`.
    pub fn node_path(&self, sling_initial_content: bool) -> RepositoryPath {
        if self.0.ends_with(DESCRIPTOR_FILE_NAME) {
            return self.parent().unwrap_or_else(Self::root);
        }
        if sling_initial_content {
            if let Some(stripped) = self.0.strip_suffix(JSON_SUFFIX) {
                return Self::new(stripped);
            }
        }
        self.clone()
    }
}

impl fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
