use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lookout - keep a content repository in sync with your checkout
#[derive(Parser, Debug)]
#[command(name = "lookout")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Set RUST_LOG to fine-tune log output, e.g. RUST_LOG=lookout=debug.")]
pub struct Cli {
    /// Emit watch events as NDJSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the configured targets and sync every change
    Watch {
        /// Config file (default: lookout.json or lookout.toml in the checkout root)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Checkout root that config paths are relative to
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,
    },

    /// Sync one file or directory once
    Sync {
        /// File or directory to sync
        filesystem: PathBuf,

        /// Repository path (default: resolved through the enclosing jcr_root)
        #[arg(long)]
        jcr: Option<String>,

        /// Treat *.json files as Sling-Initial-Content
        #[arg(long)]
        sling: bool,

        /// Config file providing instances
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert Sling-Initial-Content JSON to .content.xml
    Convert {
        /// A JSON file (printed to stdout) or a directory tree
        path: PathBuf,

        /// Replace every *.json under PATH with its .content.xml
        #[arg(long)]
        in_place: bool,
    },
}
