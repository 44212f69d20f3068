//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all subprocess and file watcher I/O.
//!
//! ## Structure
//!
//! - `importer` - `vlt` package importer
//! - `terminal` - Streamed subprocesses and the shell command runner
//! - `watch` - notify-based change source

pub mod importer;
pub mod terminal;
pub mod watch;

// Re-export for convenience
pub use importer::{VltImporter, DEFAULT_VLT};
pub use terminal::{run_streamed, ShellCommandRunner};
pub use watch::{NotifyChangeSource, NotifySourceFactory, WatcherState};
