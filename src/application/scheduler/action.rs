//! What a scheduler runs for each change batch

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::sync::SyncOrchestrator;
use crate::cancel::CancelToken;
use crate::domain::entities::{ChangeBatch, SyncJob};
use crate::domain::ports::{CommandRunner, ProcessError};
use crate::domain::services::PathMapper;
use crate::domain::value_objects::Host;
use crate::error::LookoutError;

/// Tally of one job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    pub cancelled: bool,
}

impl JobOutcome {
    fn record_failure(&mut self, message: String) {
        self.failed += 1;
        self.errors.push(message);
    }
}

/// Work triggered by a change batch. Runs on the job thread.
pub trait BatchAction: Send + Sync {
    fn run(&self, batch: &ChangeBatch, cancel: &CancelToken) -> JobOutcome;
}

/// Package and import every changed path
pub struct SyncAction {
    mapper: PathMapper,
    hosts: Vec<Host>,
    orchestrator: Arc<SyncOrchestrator>,
}

impl SyncAction {
    pub fn new(mapper: PathMapper, hosts: Vec<Host>, orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self {
            mapper,
            hosts,
            orchestrator,
        }
    }

    fn sync_path(&self, path: &Path, cancel: &CancelToken) -> Result<(), LookoutError> {
        let repository_path = self.mapper.resolve(path)?;
        let job = SyncJob::new(path, repository_path, self.hosts.clone())
            .with_sling_initial_content(self.mapper.is_sling_initial_content());
        info!("Syncing {} to {}", path.display(), job.repository_path);
        self.orchestrator.run(&job, cancel)?.into_result()?;
        Ok(())
    }
}

/// The nearest existing ancestor of a vanished path
fn existing_path(path: &Path) -> PathBuf {
    let mut current = path;
    while !current.exists() {
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    if current != path {
        warn!(
            "{} no longer exists, syncing {} instead",
            path.display(),
            current.display()
        );
    }
    current.to_path_buf()
}

impl BatchAction for SyncAction {
    fn run(&self, batch: &ChangeBatch, cancel: &CancelToken) -> JobOutcome {
        let paths = ChangeBatch::new(batch.iter().map(existing_path));
        let mut outcome = JobOutcome::default();

        for path in paths.iter() {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            match self.sync_path(path, cancel) {
                Ok(()) => outcome.succeeded += 1,
                Err(e) if e.is_cancelled() => {
                    debug!("Sync of {} cancelled", path.display());
                    outcome.cancelled = true;
                    break;
                }
                Err(e) => {
                    error!("Failed to sync {}: {}", path.display(), e);
                    outcome.record_failure(format!("{}: {}", path.display(), e));
                }
            }
        }
        outcome
    }
}

/// Run a shell command once per batch
pub struct CommandAction {
    command: String,
    working_dir: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl CommandAction {
    pub fn new(command: impl Into<String>, working_dir: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            command: command.into(),
            working_dir,
            runner,
        }
    }
}

impl BatchAction for CommandAction {
    fn run(&self, _batch: &ChangeBatch, cancel: &CancelToken) -> JobOutcome {
        let mut outcome = JobOutcome::default();
        info!(
            "Running command `{}` in {}",
            self.command,
            self.working_dir.display()
        );

        match self.runner.run(&self.command, &self.working_dir, cancel) {
            Ok(()) => outcome.succeeded = 1,
            Err(ProcessError::Cancelled) => outcome.cancelled = true,
            Err(source) => {
                let err = LookoutError::Command {
                    command: self.command.clone(),
                    source,
                };
                error!("{}", err);
                outcome.record_failure(err.to_string());
            }
        }
        outcome
    }
}
