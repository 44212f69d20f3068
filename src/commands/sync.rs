use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use lookout::application::{SyncOrchestrator, SyncReport};
use lookout::cancel::CancelToken;
use lookout::config::find_config;
use lookout::domain::entities::SyncJob;
use lookout::domain::services::resolve_repository_path;
use lookout::domain::value_objects::RepositoryPath;
use lookout::infrastructure::VltImporter;

/// NDJSON line printed after a one-shot sync with `--json`
#[derive(Debug, Serialize)]
struct SyncSummary<'a> {
    event: &'static str,
    command: &'static str,
    filesystem: String,
    repository_path: &'a str,
    package: String,
    succeeded: Vec<&'a str>,
    failed: Vec<&'a str>,
    elapsed_ms: u128,
}

impl<'a> SyncSummary<'a> {
    fn new(job: &'a SyncJob, report: &'a SyncReport) -> Self {
        let hosts = |ok: bool| -> Vec<&'a str> {
            report
                .outcomes
                .iter()
                .filter(|o| o.is_success() == ok)
                .map(|o| o.host.as_str())
                .collect()
        };
        Self {
            event: "sync_complete",
            command: "sync",
            filesystem: job.filesystem_path.display().to_string(),
            repository_path: job.repository_path.as_str(),
            package: report.package.path().display().to_string(),
            succeeded: hosts(true),
            failed: hosts(false),
            elapsed_ms: report.elapsed.as_millis(),
        }
    }
}

pub fn cmd_sync(
    filesystem: &Path,
    jcr: Option<String>,
    sling: bool,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let config_path = match config_path.or_else(|| find_config(&cwd)) {
        Some(path) => path,
        None => bail!("no lookout.json or lookout.toml in {} (pass --config)", cwd.display()),
    };
    let config = super::load_config(&config_path)?;
    let hosts = config.hosts()?;
    if hosts.is_empty() {
        bail!("{} lists no instances to sync into", config_path.display());
    }

    let filesystem = absolute(filesystem)?;
    let repository_path = match jcr {
        Some(path) => RepositoryPath::new(path),
        None => resolve_repository_path(&filesystem)?,
    };

    let job = SyncJob::new(filesystem, repository_path, hosts).with_sling_initial_content(sling);
    info!("Syncing {} to {}", job.filesystem_path.display(), job.repository_path);

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("failed to install Ctrl+C handler")?;

    let orchestrator =
        SyncOrchestrator::new(Arc::new(VltImporter::new(config.importer_executable())));
    let report = orchestrator.run(&job, &cancel)?;

    if json {
        println!("{}", serde_json::to_string(&SyncSummary::new(&job, &report))?);
    }

    report.into_result()?;
    Ok(())
}

/// The path made absolute; a deleted path is kept as given so its removal syncs
fn absolute(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(path) => Ok(path),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => Ok(std::env::current_dir()
            .context("failed to read the working directory")?
            .join(path)),
    }
}
