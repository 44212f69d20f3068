//! Lookout - keeps a content repository in sync with a source checkout
//!
//! Lookout watches vault package `jcr_root` trees, Sling-Initial-Content
//! source trees, and command triggers. Each change is packaged as a small
//! vault package and imported into every configured instance.

pub mod application;
pub mod cancel;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{PackageBuilder, SyncOrchestrator, SyncReport, WatchEvent, WatchSupervisor};
pub use cancel::CancelToken;
pub use config::Config;
pub use domain::entities::{ChangeBatch, JcrNode, JcrValue, PackageDescriptor, SyncJob};
pub use domain::services::{resolve_repository_path, serialize, PathMapper};
pub use domain::value_objects::{Host, RepositoryPath, WatchSpec, WatchTarget};
pub use error::{LookoutError, LookoutResult};
