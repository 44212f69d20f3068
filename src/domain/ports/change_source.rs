//! Change Source Port
//!
//! Delivers coalesced batches of changed paths for one watched directory.

use std::path::Path;
use std::time::Duration;

use crate::domain::entities::ChangeBatch;
use crate::error::LookoutResult;

/// A stream of change batches for one directory tree
pub trait ChangeSource: Send {
    /// Wait up to `poll` for activity.
    ///
    /// Returns a batch once changes have been quiet for the source's
    /// coalescing window, `None` otherwise.
    fn next_batch(&mut self, poll: Duration) -> Option<ChangeBatch>;
}

/// Opens change sources; one per watch target
pub trait ChangeSourceFactory: Send + Sync {
    fn open(&self, root: &Path, latency: Duration) -> LookoutResult<Box<dyn ChangeSource>>;
}
