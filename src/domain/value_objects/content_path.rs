//! Content Path Value Object
//!
//! A filesystem path classified once by what it holds: a node descriptor
//! (`.content.xml`), a Sling-Initial-Content JSON source, or plain content.

use std::fmt;
use std::path::{Path, PathBuf};

/// File name suffix of a node descriptor
pub const DESCRIPTOR_FILE_NAME: &str = ".content.xml";

/// Suffix of a Sling-Initial-Content JSON source
pub const JSON_SUFFIX: &str = ".json";

/// Error when a path cannot be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPathError {
    /// Path is empty
    Empty,
    /// Path has no final component (`/`, `..`)
    NoFileName(PathBuf),
}

impl fmt::Display for ContentPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentPathError::Empty => write!(f, "Path is empty"),
            ContentPathError::NoFileName(path) => {
                write!(f, "Path '{}' has no file name", path.display())
            }
        }
    }
}

impl std::error::Error for ContentPathError {}

/// What a content path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `.content.xml` descriptor; shares a node with its directory
    Descriptor,
    /// `<name>.json` Sling-Initial-Content source for node `<name>`
    JsonSource,
    /// Any other file or directory
    Plain,
}

/// A classified filesystem path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPath {
    path: PathBuf,
    kind: ContentKind,
}

impl ContentPath {
    /// Classify a path
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, ContentPathError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ContentPathError::Empty);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ContentPathError::NoFileName(path.to_path_buf()))?;

        let kind = if name.ends_with(DESCRIPTOR_FILE_NAME) {
            ContentKind::Descriptor
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            ContentKind::JsonSource
        } else {
            ContentKind::Plain
        };

        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Directory this path's content lives in as a node.
    ///
    /// Descriptors map to their parent; everything else to itself.
    pub fn node_dir(&self) -> &Path {
        match self.kind {
            ContentKind::Descriptor => self.path.parent().unwrap_or(&self.path),
            ContentKind::JsonSource | ContentKind::Plain => &self.path,
        }
    }

    /// For a JSON source, the sibling directory holding its expanded
    /// children (`foo.json` → `foo/`)
    pub fn expanded_dir(&self) -> Option<PathBuf> {
        match self.kind {
            ContentKind::JsonSource => Some(self.path.with_extension("")),
            ContentKind::Descriptor | ContentKind::Plain => None,
        }
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
