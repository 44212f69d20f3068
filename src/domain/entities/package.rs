//! PackageDescriptor entity - a staged vault package on disk
//!
//! Layout expected by the importer:
//!
//! ```text
//! <staging>/jcr_root/<repository path>/...
//! <staging>/META-INF/vault/settings.xml
//! <staging>/META-INF/vault/filter.xml
//! ```

use std::path::{Path, PathBuf};

use crate::domain::value_objects::RepositoryPath;

/// Name of the content directory inside a package
pub const JCR_ROOT_DIR: &str = "jcr_root";

/// Vault metadata directory, relative to the package root
pub const VAULT_DIR: &str = "META-INF/vault";

/// Names the importer skips when reading package content
pub const IGNORED_NAMES: &[&str] = &[".svn", ".gitignore", ".DS_Store"];

/// A fully built staging directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    root: PathBuf,
    filter_roots: Vec<RepositoryPath>,
}

impl PackageDescriptor {
    pub fn new(root: PathBuf, filter_roots: Vec<RepositoryPath>) -> Self {
        Self { root, filter_roots }
    }

    /// Package root handed to the importer
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn jcr_root(&self) -> PathBuf {
        self.root.join(JCR_ROOT_DIR)
    }

    pub fn vault_dir(&self) -> PathBuf {
        self.root.join(VAULT_DIR)
    }

    pub fn filter_roots(&self) -> &[RepositoryPath] {
        &self.filter_roots
    }

    /// Remove the staging directory.
    ///
    /// Nothing calls this automatically; a failed or cancelled build leaves
    /// its directory behind for inspection.
    pub fn discard(self) -> std::io::Result<()> {
        std::fs::remove_dir_all(&self.root)
    }
}

/// `settings.xml` contents
pub fn settings_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<vault version=\"0.1\">\n");
    for name in IGNORED_NAMES {
        xml.push_str(&format!("  <ignore name=\"{}\"/>\n", name));
    }
    xml.push_str("</vault>\n");
    xml
}

/// `filter.xml` contents, one replace filter per root
pub fn filter_xml(roots: &[RepositoryPath]) -> String {
    let mut xml =
        String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<workspaceFilter version=\"1.0\">\n");
    for root in roots {
        xml.push_str(&format!("  <filter root=\"{}\" mode=\"replace\"/>\n", root));
    }
    xml.push_str("</workspaceFilter>\n");
    xml
}
