//! Command-line interface definitions for mapman.
//!
//! The CLI definitions are shared between the main binary and the xtask
//! binary (for man page generation).

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for mapman.
#[derive(Parser)]
#[command(
    name = "mapman",
    version = crate::VERSION,
    about = "Rebuild the campaign map manifest from the files on disk",
    long_about = "Scans campaign directories, hashes every map and mod with SHA-256, bumps \
                  versions for anything that changed and rewrites the JSON manifest"
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `update`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Repository root; asset URLs are relative to it
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file (default: <root>/mapman.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Campaigns directory, relative to the root
    #[arg(long, global = true, value_name = "DIR")]
    pub campaigns: Option<PathBuf>,

    /// Manifest file, relative to the root
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Repository identity used in fetch URLs
    #[arg(
        long,
        global = true,
        env = crate::REPOSITORY_ENV,
        value_name = "OWNER/REPO"
    )]
    pub repository: Option<String>,

    /// Branch used in fetch URLs
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Show per-campaign reports
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the completion message
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl From<&GlobalArgs> for crate::Overrides {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            root: args.root.clone(),
            config_path: args.config.clone(),
            campaigns: args.campaigns.clone(),
            manifest: args.manifest.clone(),
            repository: args.repository.clone(),
            branch: args.branch.clone(),
        }
    }
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rescan campaigns and rewrite the manifest (default)
    Update {
        /// Print the manifest to stdout instead of writing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
