//! Application Layer
//!
//! Use cases that orchestrate the sync flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT talk to the filesystem watcher or subprocesses directly
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PackageBuilder` - Stage a vault package for one change
//! - `SyncOrchestrator` - Build once, import into every host
//! - `ChangeScheduler` - Debounced single-flight jobs per watch target
//! - `WatchSupervisor` - One watcher thread per target

pub mod events;
pub mod package;
pub mod scheduler;
pub mod supervisor;
pub mod sync;

pub use events::{discard_events, EventSink, WatchEvent};
pub use package::{PackageBuilder, STAGING_PREFIX};
pub use scheduler::{BatchAction, ChangeScheduler, CommandAction, JobOutcome, SyncAction};
pub use supervisor::{WatchSupervisor, POLL_INTERVAL};
pub use sync::{HostOutcome, SyncOrchestrator, SyncReport, IMPORT_DESTINATION};
