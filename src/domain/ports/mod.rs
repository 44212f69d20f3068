//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_source;
pub mod process;

pub use change_source::{ChangeSource, ChangeSourceFactory};
pub use process::{CommandRunner, PackageImporter, ProcessError};
