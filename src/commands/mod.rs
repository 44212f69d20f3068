mod convert;
mod sync;
mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use lookout::config::Config;

pub use convert::cmd_convert;
pub use sync::cmd_sync;
pub use watch::cmd_watch;

/// Load a config file, logging unknown keys, then apply `LOOKOUT_*` overrides
fn load_config(path: &Path) -> Result<Config> {
    let (config, warnings) = Config::load_with_warnings(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    Ok(config.with_env_overrides())
}
