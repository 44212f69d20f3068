//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod content_path;
mod host;
mod ignore_rules;
mod repository_path;
mod watch_target;

pub use config_warning::ConfigWarning;
pub use content_path::{
    ContentKind, ContentPath, ContentPathError, DESCRIPTOR_FILE_NAME, JSON_SUFFIX,
};
pub use host::Host;
pub use ignore_rules::{IgnoreError, IgnoreRules, DEFAULT_PATTERNS};
pub use repository_path::RepositoryPath;
pub use watch_target::{WatchSpec, WatchTarget, COMMAND_LATENCY, PACKAGE_LATENCY};
