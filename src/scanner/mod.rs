//! Campaign directory scanner.
//!
//! The campaigns root holds one directory per campaign. Map files sit
//! directly inside a campaign directory and mod files inside its nested mods
//! directory; nothing deeper is visited.
//!
//! ```text
//! campaigns/
//!   desertstrike/
//!     Launcher.SC2Map
//!     map1.SC2Map
//!     mods/
//!       Assets.SC2Mod
//! ```

use crate::config::ScanConfig;
use crate::utils::paths::file_name_string;
use anyhow::{Context, Result};
use glob::Pattern;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Whether a file was found as a map or as a mod
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Directly inside the campaign directory
    Map,
    /// Inside the campaign's mods directory
    Mod,
}

/// A file discovered on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedAsset {
    /// File name, used as the asset name in the manifest
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Map or mod
    pub kind: AssetKind,
}

/// A campaign directory and the assets found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDir {
    /// Directory name as it appears on disk
    pub folder: String,
    /// Full path to the directory
    pub path: PathBuf,
    /// Assets sorted case-insensitively by name, maps before mods on ties
    pub assets: Vec<ScannedAsset>,
}

/// Scanner for enumerating campaigns and their asset files
pub struct CampaignScanner {
    /// Directory holding one subdirectory per campaign
    root: PathBuf,
    /// Patterns selecting map files
    map_patterns: Vec<Pattern>,
    /// Patterns selecting mod files
    mod_patterns: Vec<Pattern>,
    /// Name of the nested mods directory
    mods_dir: String,
}

impl CampaignScanner {
    /// Create a new campaign scanner
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern is not a valid glob.
    pub fn new(root: PathBuf, scan: &ScanConfig) -> Result<Self> {
        Ok(Self {
            root,
            map_patterns: compile_patterns(&scan.map_patterns)?,
            mod_patterns: compile_patterns(&scan.mod_patterns)?,
            mods_dir: scan.mods_dir.clone(),
        })
    }

    /// Enumerate every campaign directory, sorted by name
    ///
    /// Entries of the root that are not directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The campaigns root does not exist or is not a directory
    /// - A directory cannot be read
    pub fn scan(&self) -> Result<Vec<CampaignDir>> {
        let span = span!(Level::DEBUG, "scan_campaigns", root = %self.root.display());
        let _guard = span.enter();

        if !self.root.is_dir() {
            anyhow::bail!("Campaigns directory not found: {}", self.root.display());
        }

        let mut campaigns = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if let Some(link) = dangling_link(&e) {
                        debug!(path = %link.display(), "Skipping dangling symlink");
                        continue;
                    }
                    return Err(e).with_context(|| {
                        format!("Failed to read directory entry in {}", self.root.display())
                    });
                }
            };

            if !entry.file_type().is_dir() {
                debug!(path = %entry.path().display(), "Skipping non-directory entry");
                continue;
            }

            campaigns.push(self.scan_campaign(entry.path())?);
        }

        debug!(count = campaigns.len(), "Campaign scan complete");
        Ok(campaigns)
    }

    /// Collect the assets of a single campaign directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or its mods directory cannot be read.
    pub fn scan_campaign(&self, dir: &Path) -> Result<CampaignDir> {
        let mut assets = collect_files(dir, &self.map_patterns, AssetKind::Map)?;

        let mods = dir.join(&self.mods_dir);
        if mods.is_dir() {
            assets.extend(collect_files(&mods, &self.mod_patterns, AssetKind::Mod)?);
        }

        // Stable: maps keep precedence over mods with the same lowercase name
        assets.sort_by_cached_key(|asset| asset.name.to_lowercase());

        let folder = file_name_string(dir);
        debug!(folder = %folder, assets = assets.len(), "Scanned campaign");

        Ok(CampaignDir {
            folder,
            path: dir.to_path_buf(),
            assets,
        })
    }
}

/// Compiles glob patterns matched against file names
fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid scan pattern: {p}")))
        .collect()
}

/// Regular files directly inside `dir` whose names match any of `patterns`
fn collect_files(dir: &Path, patterns: &[Pattern], kind: AssetKind) -> Result<Vec<ScannedAsset>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // A dangling link only matters if it would have been an asset
                let skip = dangling_link(&e).is_some_and(|link| {
                    let name = file_name_string(link);
                    !patterns.iter().any(|p| p.matches(&name))
                });
                if skip {
                    continue;
                }
                return Err(e)
                    .with_context(|| format!("Failed to read directory entry in {}", dir.display()));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if patterns.iter().any(|p| p.matches(&name)) {
            files.push(ScannedAsset {
                name,
                path: entry.path().to_path_buf(),
                kind,
            });
        }
    }

    Ok(files)
}

/// Path of a symlink whose target is missing, if that is what `err` reports
fn dangling_link(err: &walkdir::Error) -> Option<&Path> {
    let missing = err.io_error().is_some_and(|e| e.kind() == ErrorKind::NotFound);
    err.path()
        .filter(|path| missing && path.symlink_metadata().is_ok_and(|m| m.file_type().is_symlink()))
}
