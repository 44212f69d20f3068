use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use lookout::application::{
    discard_events, EventSink, SyncOrchestrator, WatchEvent, WatchSupervisor,
};
use lookout::config::find_config;
use lookout::infrastructure::{NotifySourceFactory, ShellCommandRunner, VltImporter};

pub fn cmd_watch(config_path: Option<PathBuf>, repo: &Path, json: bool) -> Result<()> {
    let repo_root = repo
        .canonicalize()
        .with_context(|| format!("checkout root {} does not exist", repo.display()))?;

    let config_path = match config_path.or_else(|| find_config(&repo_root)) {
        Some(path) => path,
        None => bail!(
            "no lookout.json or lookout.toml in {} (pass --config)",
            repo_root.display()
        ),
    };
    let config = super::load_config(&config_path)?;
    config.validate()?;

    let specs = config.watch_specs(&repo_root)?;
    if specs.is_empty() {
        bail!("{} configures nothing to watch", config_path.display());
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let orchestrator = Arc::new(SyncOrchestrator::new(Arc::new(VltImporter::new(
        config.importer_executable(),
    ))));

    let events: EventSink = if json {
        Arc::new(|event: WatchEvent| println!("{}", event.to_json()))
    } else {
        discard_events()
    };

    info!(
        "Watching {} target(s) from {}",
        specs.len(),
        config_path.display()
    );

    WatchSupervisor::new(
        Arc::new(NotifySourceFactory),
        orchestrator,
        Arc::new(ShellCommandRunner),
        running,
    )
    .with_hosts(config.hosts()?)
    .with_ignore_patterns(config.ignore.clone())
    .with_events(events)
    .run(specs)?;

    Ok(())
}
