#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # Mapman - Campaign Manifest Builder
//!
//! Mapman keeps a JSON manifest of map and mod "campaigns" in sync with the
//! files stored in a repository. Each run scans the campaign directories,
//! hashes every asset with SHA-256, bumps versions for anything that changed
//! and rewrites the manifest that launchers poll for updates.
//!
//! ## Architecture
//!
//! - [`manifest`]: Manifest data model, loading, saving and the campaign lookup index
//! - [`scanner`]: Campaign directory enumeration
//! - [`reconcile`]: Merging on-disk state with the prior manifest
//! - [`version`]: `MAJOR.MINOR` parsing and bumping
//! - [`remote`]: Repository identity and fetch URL construction
//! - [`config`]: Configuration parsing and validation
//! - [`commands`]: Command implementations
//! - [`output`]: Output formatting and verbosity control
//! - [`utils`]: Hashing, slugs, paths and URL encoding
//!
//! ## Example Usage
//!
//! ```no_run
//! use mapman::MapmanContext;
//! use mapman::remote::{FetchBase, RepoIdentity};
//!
//! # fn main() -> anyhow::Result<()> {
//! let identity: RepoIdentity = "octo/maps".parse()?;
//! let fetch = FetchBase::new("https://raw.githubusercontent.com", &identity, "main");
//! let ctx = MapmanContext::new_explicit("/srv/maps".into(), mapman::config::Config::default(), fetch);
//!
//! mapman::commands::update::execute(&ctx, false)?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing the CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Manifest data model and persistence.
pub mod manifest;

/// Output formatting and verbosity control.
pub mod output;

/// Merging scanned campaigns with the prior manifest.
pub mod reconcile;

/// Repository identity resolution and fetch URLs.
pub mod remote;

/// Campaign directory scanning.
pub mod scanner;

/// Tracing subscriber setup.
pub mod telemetry;

/// Utility functions and helpers.
pub mod utils;

/// Asset and campaign version numbers.
pub mod version;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::remote::FetchBase;

/// Current version of the mapman binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name, relative to the repository root.
pub const DEFAULT_CONFIG_FILE: &str = "mapman.toml";

/// Environment variable consulted for the `owner/repo` identity.
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Values supplied on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Repository root (defaults to the current directory).
    pub root: Option<PathBuf>,
    /// Explicit configuration file path.
    pub config_path: Option<PathBuf>,
    /// Campaigns directory.
    pub campaigns: Option<PathBuf>,
    /// Manifest file.
    pub manifest: Option<PathBuf>,
    /// `owner/repo` identity, usually from `GITHUB_REPOSITORY`.
    pub repository: Option<String>,
    /// Branch used in fetch URLs.
    pub branch: Option<String>,
}

/// Immutable settings shared by every stage of a run.
///
/// Everything that depends on the environment (repository identity, fetch
/// base URL, resolved paths) is computed once here, before any file is read.
#[derive(Debug, Clone)]
pub struct MapmanContext {
    /// Canonical repository root; asset URLs are built relative to it.
    pub repo_root: PathBuf,

    /// Directory holding one subdirectory per campaign.
    pub campaigns_dir: PathBuf,

    /// Manifest file read at the start and rewritten at the end of a run.
    pub manifest_path: PathBuf,

    /// Loaded configuration.
    pub config: config::Config,

    /// Base URL that asset paths are appended to.
    pub fetch: FetchBase,
}

impl MapmanContext {
    /// Resolves the context from command-line overrides, the config file and
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved, the configuration is
    /// invalid, or the repository identity cannot be determined.
    pub fn from_overrides(overrides: &Overrides) -> Result<Self> {
        let root = match &overrides.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Could not determine current directory")?,
        };
        let repo_root = root
            .canonicalize()
            .with_context(|| format!("Repository root not found: {}", root.display()))?;

        let config_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| repo_root.join(DEFAULT_CONFIG_FILE));
        let mut config = config::Config::load(&config_path)?;

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&config_path) {
            output::warning(&format!("Configuration validation failed: {e}"));
        }

        if let Some(campaigns) = &overrides.campaigns {
            config.paths.campaigns.clone_from(campaigns);
        }
        if let Some(manifest) = &overrides.manifest {
            config.paths.manifest.clone_from(manifest);
        }
        if let Some(branch) = &overrides.branch {
            config.remote.branch.clone_from(branch);
        }
        config::parser::validate_config(&config)?;

        let identity = remote::resolve_identity(
            overrides.repository.as_deref(),
            config.remote.repository.as_deref(),
            &repo_root,
        )?;
        let fetch = FetchBase::new(&config.remote.raw_base, &identity, &config.remote.branch);

        Ok(Self::new_explicit(repo_root, config, fetch))
    }

    /// Creates a context from already-resolved parts, without touching the
    /// environment. Relative paths in `config` are resolved against `repo_root`.
    #[must_use]
    pub fn new_explicit(repo_root: PathBuf, config: config::Config, fetch: FetchBase) -> Self {
        let campaigns_dir = resolve_under(&repo_root, &config.paths.campaigns);
        let manifest_path = resolve_under(&repo_root, &config.paths.manifest);

        Self {
            repo_root,
            campaigns_dir,
            manifest_path,
            config,
            fetch,
        }
    }
}

/// Joins a relative path onto `root`, canonicalizing when the target exists so
/// that prefix stripping against the canonical root works.
fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    joined.canonicalize().unwrap_or(joined)
}
