//! Sync orchestration: one package, imported into every host concurrently

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::cancel::CancelToken;
use crate::domain::entities::{PackageDescriptor, SyncJob};
use crate::domain::ports::{PackageImporter, ProcessError};
use crate::error::{LookoutError, LookoutResult};

use super::package::PackageBuilder;

/// Repository path every package is imported below
pub const IMPORT_DESTINATION: &str = "/";

/// Result of importing into one host
#[derive(Debug)]
pub struct HostOutcome {
    /// Repository URL (no credentials)
    pub host: String,
    pub result: Result<(), ProcessError>,
}

impl HostOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of one sync job across all hosts
#[derive(Debug)]
pub struct SyncReport {
    pub package: PackageDescriptor,
    /// One entry per host, in configuration order
    pub outcomes: Vec<HostOutcome>,
    pub elapsed: Duration,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(HostOutcome::is_success)
    }

    pub fn failed_hosts(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.host.clone())
            .collect()
    }

    /// `Ok` only if every host imported the package
    pub fn into_result(self) -> LookoutResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let cancelled = self
            .outcomes
            .iter()
            .any(|o| matches!(o.result, Err(ProcessError::Cancelled)));
        if cancelled {
            return Err(LookoutError::Cancelled);
        }
        Err(LookoutError::PartialSyncFailure {
            failed: self.failed_hosts(),
        })
    }
}

/// Builds a package for a job and fans it out to every host
pub struct SyncOrchestrator {
    builder: PackageBuilder,
    importer: Arc<dyn PackageImporter>,
}

impl SyncOrchestrator {
    pub fn new(importer: Arc<dyn PackageImporter>) -> Self {
        Self {
            builder: PackageBuilder::new(),
            importer,
        }
    }

    pub fn with_builder(mut self, builder: PackageBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Build the package and import it into every host.
    ///
    /// Host failures are collected in the report, never short-circuited;
    /// use [`SyncReport::into_result`] to turn them into an error.
    pub fn run(&self, job: &SyncJob, cancel: &CancelToken) -> LookoutResult<SyncReport> {
        let start = Instant::now();
        let package = self.builder.build(job, cancel)?;

        let outcomes = thread::scope(|scope| {
            let handles: Vec<_> = job
                .hosts
                .iter()
                .map(|host| {
                    let package = package.path();
                    let importer = &self.importer;
                    let handle = scope.spawn(move || {
                        info!(
                            "Installing {} into {} with {}",
                            package.display(),
                            host,
                            importer.name()
                        );
                        importer.import(host, package, IMPORT_DESTINATION, cancel)
                    });
                    (host.repository_url(), handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(host, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(ProcessError::Io(std::io::Error::other("importer panicked")))
                    });
                    if let Err(e) = &result {
                        if !matches!(e, ProcessError::Cancelled) {
                            error!("Import into {} failed: {}", host, e);
                        }
                    }
                    HostOutcome { host, result }
                })
                .collect::<Vec<_>>()
        });

        let elapsed = start.elapsed();
        info!("Elapsed time: {:.2} seconds", elapsed.as_secs_f64());

        Ok(SyncReport {
            package,
            outcomes,
            elapsed,
        })
    }
}
