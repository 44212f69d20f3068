//! Per-target change scheduling
//!
//! Each watch target owns one `ChangeScheduler`. A batch that arrives while
//! a job is still running cancels that job, waits for it to unwind and then
//! starts a job for the new batch, so at most one job per target is ever in
//! flight.

mod action;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::application::events::{EventSink, WatchEvent};
use crate::cancel::CancelToken;
use crate::domain::entities::ChangeBatch;
use crate::domain::value_objects::IgnoreRules;

pub use action::{BatchAction, CommandAction, JobOutcome, SyncAction};

struct RunningJob {
    cancel: CancelToken,
    handle: JoinHandle<()>,
}

/// Debounced single-flight job runner for one watch target
pub struct ChangeScheduler {
    target: String,
    ignore: IgnoreRules,
    action: Arc<dyn BatchAction>,
    events: EventSink,
    running: Option<RunningJob>,
}

impl ChangeScheduler {
    pub fn new(
        target: impl Into<String>,
        ignore: IgnoreRules,
        action: Arc<dyn BatchAction>,
        events: EventSink,
    ) -> Self {
        Self {
            target: target.into(),
            ignore,
            action,
            events,
            running: None,
        }
    }

    /// Start a job for the non-ignored paths in `batch`, superseding any
    /// running job.
    ///
    /// Returns `false` when every path was ignored.
    pub fn handle_batch(&mut self, mut batch: ChangeBatch) -> bool {
        batch.retain(|path| !self.ignore.is_ignored(path));
        if batch.is_empty() {
            return false;
        }

        let paths: Vec<String> = batch.iter().map(|p| p.display().to_string()).collect();
        info!("Change detected: {}", paths.join(", "));
        self.emit(WatchEvent::ChangesDetected {
            target: self.target.clone(),
            paths,
        });

        self.supersede();
        self.spawn(batch);
        true
    }

    /// Whether a job is in flight (a finished job counts until reaped)
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Join a job that has already finished
    pub fn reap(&mut self) {
        let finished = self
            .running
            .as_ref()
            .map(|job| job.handle.is_finished())
            .unwrap_or(false);
        if finished {
            if let Some(job) = self.running.take() {
                self.join(job);
            }
        }
    }

    /// Cancel and join the in-flight job
    pub fn shutdown(&mut self) {
        if let Some(job) = self.running.take() {
            debug!("Stopping job for {}", self.target);
            job.cancel.cancel();
            self.join(job);
        }
    }

    fn supersede(&mut self) {
        let Some(job) = self.running.take() else {
            return;
        };
        if job.handle.is_finished() {
            self.join(job);
            return;
        }

        warn!("Cancelling running job for {}", self.target);
        job.cancel.cancel();
        self.join(job);
        self.emit(WatchEvent::JobSuperseded {
            target: self.target.clone(),
        });
    }

    fn spawn(&mut self, batch: ChangeBatch) {
        let cancel = CancelToken::new();
        let action = Arc::clone(&self.action);
        let events = Arc::clone(&self.events);
        let target = self.target.clone();
        let token = cancel.clone();

        events(WatchEvent::JobStarted {
            target: target.clone(),
        });
        let handle = thread::spawn(move || {
            let outcome = action.run(&batch, &token);
            if outcome.cancelled {
                debug!("Job for {} cancelled", target);
                return;
            }
            for message in &outcome.errors {
                events(WatchEvent::Error {
                    target: target.clone(),
                    message: message.clone(),
                });
            }
            if outcome.failed == 0 {
                info!("Synced {} change(s) for {}", outcome.succeeded, target);
            }
            events(WatchEvent::SyncComplete {
                target,
                succeeded: outcome.succeeded,
                failed: outcome.failed,
            });
        });

        self.running = Some(RunningJob { cancel, handle });
    }

    fn join(&self, job: RunningJob) {
        if job.handle.join().is_err() {
            error!("Job for {} panicked", self.target);
            self.emit(WatchEvent::Error {
                target: self.target.clone(),
                message: "job panicked".to_string(),
            });
        }
    }

    fn emit(&self, event: WatchEvent) {
        (self.events)(event);
    }
}

impl Drop for ChangeScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
