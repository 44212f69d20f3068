//! Watch supervision: one watcher thread and scheduler per target

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::application::events::{discard_events, EventSink, WatchEvent};
use crate::application::scheduler::{BatchAction, ChangeScheduler, CommandAction, SyncAction};
use crate::application::sync::SyncOrchestrator;
use crate::domain::ports::{ChangeSourceFactory, CommandRunner};
use crate::domain::services::PathMapper;
use crate::domain::value_objects::{Host, IgnoreRules, WatchSpec, WatchTarget};
use crate::error::LookoutResult;

/// How long a watcher thread blocks before rechecking the running flag
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs every configured watch target until the running flag clears
pub struct WatchSupervisor {
    sources: Arc<dyn ChangeSourceFactory>,
    orchestrator: Arc<SyncOrchestrator>,
    runner: Arc<dyn CommandRunner>,
    hosts: Vec<Host>,
    ignore_patterns: Vec<String>,
    events: EventSink,
    running: Arc<AtomicBool>,
}

impl WatchSupervisor {
    pub fn new(
        sources: Arc<dyn ChangeSourceFactory>,
        orchestrator: Arc<SyncOrchestrator>,
        runner: Arc<dyn CommandRunner>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            sources,
            orchestrator,
            runner,
            hosts: Vec::new(),
            ignore_patterns: Vec::new(),
            events: discard_events(),
            running,
        }
    }

    pub fn with_hosts(mut self, hosts: Vec<Host>) -> Self {
        self.hosts = hosts;
        self
    }

    /// Extra gitignore-style patterns on top of the defaults
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    /// Watch every target (blocking).
    ///
    /// Targets whose root is missing are skipped. A target that fails to
    /// start is reported and does not affect the others.
    pub fn run(&self, specs: Vec<WatchSpec>) -> LookoutResult<()> {
        (self.events)(WatchEvent::WatchStarted {
            targets: specs.iter().map(|s| s.target.to_string()).collect(),
        });

        thread::scope(|scope| {
            for spec in specs {
                let Some(spec) = self.prepare(spec) else {
                    continue;
                };
                scope.spawn(move || {
                    let target = spec.target.watch_path().display().to_string();
                    if let Err(e) = self.watch(spec) {
                        error!("Watching {} failed: {}", target, e);
                        (self.events)(WatchEvent::Error {
                            target,
                            message: e.to_string(),
                        });
                    }
                });
            }
        });

        info!("Stopped watching");
        (self.events)(WatchEvent::Shutdown);
        Ok(())
    }

    /// Canonicalize the target's root, or skip it when it does not exist
    fn prepare(&self, spec: WatchSpec) -> Option<WatchSpec> {
        let root = spec.target.watch_path();
        match root.canonicalize() {
            Ok(canonical) => Some(WatchSpec {
                target: spec.target.with_watch_path(canonical),
                latency: spec.latency,
            }),
            Err(e) => {
                warn!("Skipping {}: {}", spec.target, e);
                (self.events)(WatchEvent::TargetSkipped {
                    target: root.display().to_string(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn watch(&self, spec: WatchSpec) -> LookoutResult<()> {
        let root = spec.target.watch_path().to_path_buf();
        let mut source = self.sources.open(&root, spec.latency)?;
        let mut scheduler = ChangeScheduler::new(
            root.display().to_string(),
            self.ignore_rules(&root),
            self.action_for(&spec.target),
            Arc::clone(&self.events),
        );
        info!("Watching {}", spec.target);

        while self.running.load(Ordering::SeqCst) {
            if let Some(batch) = source.next_batch(POLL_INTERVAL) {
                scheduler.handle_batch(batch);
            }
            scheduler.reap();
        }

        scheduler.shutdown();
        Ok(())
    }

    fn ignore_rules(&self, root: &Path) -> IgnoreRules {
        IgnoreRules::new(root, &self.ignore_patterns).unwrap_or_else(|e| {
            warn!("{}; using default ignore patterns", e);
            IgnoreRules::defaults(root)
        })
    }

    fn action_for(&self, target: &WatchTarget) -> Arc<dyn BatchAction> {
        if let WatchTarget::CommandTrigger {
            working_dir,
            command,
            ..
        } = target
        {
            return Arc::new(CommandAction::new(
                command.clone(),
                working_dir.clone(),
                Arc::clone(&self.runner),
            ));
        }
        let mapper = PathMapper::for_target(target).unwrap_or(PathMapper::VaultPackage);
        Arc::new(SyncAction::new(
            mapper,
            self.hosts.clone(),
            Arc::clone(&self.orchestrator),
        ))
    }
}
