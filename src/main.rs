//! Lookout CLI - keep a content repository in sync with your checkout
//!
//! Usage: lookout <COMMAND>
//!
//! Commands:
//!   watch    Watch the configured targets and sync every change
//!   sync     Sync one file or directory once
//!   convert  Convert Sling-Initial-Content JSON to .content.xml

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Watch { config, repo } => commands::cmd_watch(config, &repo, cli.json),
        Commands::Sync {
            filesystem,
            jcr,
            sling,
            config,
        } => commands::cmd_sync(&filesystem, jcr, sling, config, cli.json),
        Commands::Convert { path, in_place } => commands::cmd_convert(&path, in_place, cli.json),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
