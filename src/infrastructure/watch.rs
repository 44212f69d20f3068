//! notify-backed change source with a coalescing window

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::domain::entities::ChangeBatch;
use crate::domain::ports::{ChangeSource, ChangeSourceFactory};
use crate::error::{LookoutError, LookoutResult};

/// Pending changes for one coalescing window
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: Vec<PathBuf>,
    last_change: Option<Instant>,
    latency: Duration,
}

impl WatcherState {
    pub fn new(latency: Duration) -> Self {
        Self {
            pending_changes: Vec::new(),
            last_change: None,
            latency,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.push(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if the window has been quiet long enough to flush
    pub fn should_sync(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.latency,
            None => false,
        }
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> ChangeBatch {
        self.last_change = None;
        ChangeBatch::new(self.pending_changes.drain(..))
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}

/// Recursive filesystem watcher for one directory tree
pub struct NotifyChangeSource {
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    events: Receiver<PathBuf>,
    state: WatcherState,
}

impl NotifyChangeSource {
    pub fn watch(root: &Path, latency: Duration) -> LookoutResult<Self> {
        let (tx, rx) = channel();
        let watch_err = |source| LookoutError::Watch {
            path: root.to_path_buf(),
            source,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                // Staging reads sources; only writes count as changes
                Ok(event) if matches!(event.kind, EventKind::Access(_)) => {}
                Ok(event) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Err(e) => warn!("File watcher error: {}", e),
            },
            Config::default(),
        )
        .map_err(watch_err)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(watch_err)?;
        debug!("Watching {} with {:?} latency", root.display(), latency);

        Ok(Self {
            _watcher: watcher,
            events: rx,
            state: WatcherState::new(latency),
        })
    }
}

impl ChangeSource for NotifyChangeSource {
    fn next_batch(&mut self, poll: Duration) -> Option<ChangeBatch> {
        match self.events.recv_timeout(poll) {
            Ok(path) => {
                self.state.add_change(path);
                while let Ok(path) = self.events.try_recv() {
                    self.state.add_change(path);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if !self.state.has_pending() {
                    std::thread::sleep(poll);
                }
            }
        }

        if self.state.should_sync() {
            Some(self.state.take_changes())
        } else {
            None
        }
    }
}

/// Opens a `NotifyChangeSource` per target
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifySourceFactory;

impl ChangeSourceFactory for NotifySourceFactory {
    fn open(&self, root: &Path, latency: Duration) -> LookoutResult<Box<dyn ChangeSource>> {
        Ok(Box::new(NotifyChangeSource::watch(root, latency)?))
    }
}
