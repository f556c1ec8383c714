use super::merge::AssetChange;
use std::fmt;

/// Summary of what reconciling one campaign changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignReport {
    /// On-disk directory name
    pub folder: String,
    /// Campaign version before the run, if the campaign was known
    pub previous_version: Option<String>,
    /// Campaign version after the run
    pub version: String,
    /// Whether the campaign version was bumped
    pub bumped: bool,
    /// Assets with no prior entry
    pub added: Vec<String>,
    /// Assets whose digest changed
    pub changed: Vec<String>,
    /// Number of assets whose digest matched
    pub unchanged: usize,
    /// Release assets kept without a file on disk
    pub retained: Vec<String>,
    /// Prior entries dropped because their file is gone
    pub dropped: Vec<String>,
}

impl CampaignReport {
    /// Starts an empty report for `folder`.
    #[must_use]
    pub fn new(folder: &str) -> Self {
        Self {
            folder: folder.to_string(),
            ..Self::default()
        }
    }

    /// Records the outcome for one on-disk asset.
    pub fn record(&mut self, name: &str, change: AssetChange) {
        match change {
            AssetChange::Added => self.added.push(name.to_string()),
            AssetChange::Changed => self.changed.push(name.to_string()),
            AssetChange::Unchanged => self.unchanged += 1,
        }
    }

    /// True if the campaign did not exist in the prior manifest.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.previous_version.is_none()
    }
}

impl fmt::Display for CampaignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous_version {
            None => write!(f, "{}: new at {}", self.folder, self.version)?,
            Some(previous) if self.bumped => {
                write!(f, "{}: {} -> {}", self.folder, previous, self.version)?;
            }
            Some(_) => write!(f, "{}: unchanged at {}", self.folder, self.version)?,
        }
        write!(
            f,
            " ({} added, {} changed, {} unchanged, {} retained, {} dropped)",
            self.added.len(),
            self.changed.len(),
            self.unchanged,
            self.retained.len(),
            self.dropped.len()
        )
    }
}
