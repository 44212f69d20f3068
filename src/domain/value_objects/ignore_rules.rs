//! Ignore rules value object
//!
//! Decides which changed paths never trigger a sync: editor temp files,
//! swap files and OS metadata, plus any extra gitignore-style patterns from
//! the config.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::path::{Path, PathBuf};

/// Patterns every watch target ignores
pub const DEFAULT_PATTERNS: &[&str] = &["*.tmp", "*___", ".DS_Store"];

/// Compiled ignore patterns for one watch root
///
/// Default patterns only look at the changed path's own name. Configured
/// patterns follow gitignore rules, so `node_modules/` covers everything
/// below it.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    root: PathBuf,
    defaults: Gitignore,
    extra: Gitignore,
    pattern_count: usize,
}

impl IgnoreRules {
    /// Defaults plus `extra` patterns, relative to `root`
    pub fn new(root: &Path, extra: &[String]) -> Result<Self, IgnoreError> {
        let defaults: Vec<String> = DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect();
        let (defaults, default_count) = compile(root, &defaults)?;
        let (extra, extra_count) = compile(root, extra)?;

        Ok(Self {
            root: root.to_path_buf(),
            defaults,
            extra,
            pattern_count: default_count + extra_count,
        })
    }

    /// Defaults only
    pub fn defaults(root: &Path) -> Self {
        match Self::new(root, &[]) {
            Ok(rules) => rules,
            Err(_) => Self {
                root: root.to_path_buf(),
                defaults: Gitignore::empty(),
                extra: Gitignore::empty(),
                pattern_count: 0,
            },
        }
    }

    /// Check if a changed path should be dropped.
    ///
    /// Paths outside the root are matched by file name only.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => Path::new(name),
            None => return false,
        };
        if self.defaults.matched(name, false).is_ignore() {
            return true;
        }

        let relative = match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => name,
        };
        self.extra
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

/// Errors that can occur when compiling ignore patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreError {
    /// A pattern has invalid syntax.
    InvalidPattern { pattern: String, message: String },
    /// Failed to build the gitignore matcher.
    BuildFailed(String),
}

impl fmt::Display for IgnoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid ignore pattern '{}' - {}", pattern, message)
            }
            Self::BuildFailed(msg) => write!(f, "Failed to build ignore matcher: {}", msg),
        }
    }
}

impl std::error::Error for IgnoreError {}

fn compile(root: &Path, patterns: &[String]) -> Result<(Gitignore, usize), IgnoreError> {
    let mut builder = GitignoreBuilder::new(root);
    let mut count = 0;

    for pattern in patterns {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        builder
            .add_line(None, trimmed)
            .map_err(|e| IgnoreError::InvalidPattern {
                pattern: trimmed.to_string(),
                message: e.to_string(),
            })?;
        count += 1;
    }

    let matcher = builder
        .build()
        .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;
    Ok((matcher, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> IgnoreRules {
        IgnoreRules::defaults(Path::new("/repo/jcr_root"))
    }

    #[test]
    fn ignores_temp_files() {
        assert!(rules().is_ignored(Path::new("/repo/jcr_root/apps/page.html.tmp")));
    }

    #[test]
    fn ignores_swap_suffix() {
        assert!(rules().is_ignored(Path::new("/repo/jcr_root/apps/page.html___")));
    }

    #[test]
    fn ignores_ds_store() {
        assert!(rules().is_ignored(Path::new("/repo/jcr_root/apps/.DS_Store")));
    }

    #[test]
    fn keeps_regular_content() {
        let rules = rules();
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/apps/page.html")));
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/apps/.content.xml")));
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/apps/tmp/page.html")));
    }

    #[test]
    fn defaults_only_match_the_changed_name() {
        let rules = rules();
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/cache.tmp/page.html")));
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/draft___/page.html")));
        assert!(rules.is_ignored(Path::new("/repo/jcr_root/cache.tmp")));
    }

    #[test]
    fn paths_outside_root_match_by_name() {
        let rules = rules();
        assert!(rules.is_ignored(Path::new("/elsewhere/.DS_Store")));
        assert!(!rules.is_ignored(Path::new("/elsewhere/file.txt")));
    }

    #[test]
    fn extra_patterns_apply_to_descendants() {
        let rules = IgnoreRules::new(Path::new("/repo/jcr_root"), &["node_modules/".to_string()])
            .unwrap();
        assert_eq!(rules.pattern_count(), DEFAULT_PATTERNS.len() + 1);
        assert!(rules.is_ignored(Path::new("/repo/jcr_root/apps/node_modules/x/index.js")));
        assert!(!rules.is_ignored(Path::new("/repo/jcr_root/apps/index.js")));
    }

    #[test]
    fn comments_and_blank_patterns_are_skipped() {
        let rules = IgnoreRules::new(
            Path::new("/repo"),
            &["# comment".to_string(), "   ".to_string()],
        )
        .unwrap();
        assert_eq!(rules.pattern_count(), DEFAULT_PATTERNS.len());
    }
}
