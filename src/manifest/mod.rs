//! Manifest data model and persistence.
//!
//! The manifest is a JSON array of campaign blocks, each listing its map and
//! mod assets with a content digest, a version and a fetch URL. It is read
//! once at the start of a run and rewritten in full at the end.
//!
//! ```json
//! [
//!   {
//!     "title": "Desert Strike!",
//!     "version": "1.3",
//!     "asset": "Desert Strike!.png",
//!     "maps": [
//!       {
//!         "name": "Launcher.SC2Map",
//!         "version": "1.1",
//!         "sha256": "9f86d0...",
//!         "url": "https://raw.githubusercontent.com/octo/maps/main/campaigns/desertstrike/Launcher.SC2Map"
//!       }
//!     ],
//!     "folder": "desertstrike"
//!   }
//! ]
//! ```

pub mod index;

pub use index::CampaignIndex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One map or mod file tracked by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// File name, unique within its campaign.
    pub name: String,

    /// `MAJOR.MINOR`, bumped whenever the digest changes.
    #[serde(default)]
    pub version: String,

    /// Lowercase hex SHA-256 of the file contents.
    #[serde(default)]
    pub sha256: String,

    /// Fetch URL for the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Set on entries distributed through a separate release channel; these
    /// are kept even when no matching file exists on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_asset: Option<bool>,

    /// Any other keys found on the entry, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetEntry {
    /// Creates an entry with no extra keys.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            sha256: sha256.into(),
            url: None,
            release_asset: None,
            extra: Map::new(),
        }
    }

    /// True if the entry must survive without a backing file.
    #[must_use]
    pub fn is_release_asset(&self) -> bool {
        self.release_asset == Some(true)
    }
}

/// One campaign: a directory of related maps and mods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignBlock {
    /// Display name.
    pub title: String,

    /// `MAJOR.MINOR` for the campaign as a whole.
    #[serde(default)]
    pub version: String,

    /// Cover image file name, `"{title}.png"`.
    #[serde(default)]
    pub asset: String,

    /// Assets, launcher first then by name.
    #[serde(default)]
    pub maps: Vec<AssetEntry>,

    /// On-disk directory name when it cannot be derived from `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl CampaignBlock {
    /// The key this block was registered under by earlier runs: the explicit
    /// `folder` if present, otherwise the title.
    #[must_use]
    pub fn folder_key(&self) -> &str {
        self.folder.as_deref().unwrap_or(&self.title)
    }

    /// Cover image file name for a title.
    #[must_use]
    pub fn cover_asset(title: &str) -> String {
        format!("{title}.png")
    }
}

/// The full manifest: an ordered list of campaign blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Campaigns in directory-name order.
    pub campaigns: Vec<CampaignBlock>,
}

impl Manifest {
    /// Loads the manifest at `path`, or an empty one if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of campaign blocks.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serializes the manifest as JSON indented by two spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Overwrites the manifest file with the serialized manifest in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))
    }

    /// Number of campaigns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// True if there are no campaigns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Total number of assets across all campaigns.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.campaigns.iter().map(|c| c.maps.len()).sum()
    }
}
