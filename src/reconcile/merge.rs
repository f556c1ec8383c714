//! Pure merge rules: no I/O, no logging.

use crate::manifest::AssetEntry;
use crate::utils::{is_launcher, slugify};
use crate::version;

/// What the prior manifest knew about a file found on disk.
#[derive(Debug, Clone, Copy)]
pub enum PriorAsset<'a> {
    /// An entry with the same name existed
    Found(&'a AssetEntry),
    /// The file is new to the manifest
    NotFound,
}

impl<'a> From<Option<&'a AssetEntry>> for PriorAsset<'a> {
    fn from(entry: Option<&'a AssetEntry>) -> Self {
        entry.map_or(Self::NotFound, Self::Found)
    }
}

/// How an on-disk asset compares with its prior entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetChange {
    /// No prior entry
    Added,
    /// Digest differs; version bumped
    Changed,
    /// Digest matches
    Unchanged,
}

/// Builds the entry for a file on disk from its prior state.
///
/// A new file starts at `1.0`. A known file whose digest differs gets exactly
/// one minor bump and the new digest; otherwise its digest and version are
/// kept (a malformed stored version is normalized to `1.0`). The URL is always
/// replaced, and any other fields of the prior entry are carried over.
#[must_use]
pub fn merge_asset(
    prior: PriorAsset<'_>,
    name: &str,
    digest: &str,
    url: String,
) -> (AssetEntry, AssetChange) {
    match prior {
        PriorAsset::NotFound => {
            let mut entry = AssetEntry::new(name, version::INITIAL.to_string(), digest);
            entry.url = Some(url);
            (entry, AssetChange::Added)
        }
        PriorAsset::Found(prev) if prev.sha256 != digest => (
            AssetEntry {
                version: version::bump_minor(Some(&prev.version)),
                sha256: digest.to_string(),
                url: Some(url),
                ..prev.clone()
            },
            AssetChange::Changed,
        ),
        PriorAsset::Found(prev) => (
            AssetEntry {
                version: version::normalize(&prev.version),
                url: Some(url),
                ..prev.clone()
            },
            AssetChange::Unchanged,
        ),
    }
}

/// Orders entries launcher-first, then case-insensitively by name.
///
/// The sort is stable, so entries whose lowercase names tie keep their
/// relative order.
pub fn sort_entries(entries: &mut [AssetEntry]) {
    entries.sort_by_cached_key(|entry| (!is_launcher(&entry.name), entry.name.to_lowercase()));
}

/// True if the campaign's asset list differs from its prior one.
///
/// Both lists are ordered by name and compared pairwise on name, digest and
/// version; any difference in length also counts.
#[must_use]
pub fn campaign_changed(current: &[AssetEntry], prior: &[&AssetEntry]) -> bool {
    if current.len() != prior.len() {
        return true;
    }

    let mut current: Vec<&AssetEntry> = current.iter().collect();
    let mut prior = prior.to_vec();
    current.sort_by(|a, b| a.name.cmp(&b.name));
    prior.sort_by(|a, b| a.name.cmp(&b.name));

    current
        .iter()
        .zip(&prior)
        .any(|(a, b)| a.name != b.name || a.sha256 != b.sha256 || a.version != b.version)
}

/// The `folder` value to store for a campaign block, if any.
///
/// A title that is not already its own slug always stores the slug. Otherwise
/// the on-disk directory name is stored only when it differs from the title.
#[must_use]
pub fn derive_folder(pretty_title: &str, folder: &str) -> Option<String> {
    let slug = slugify(pretty_title);
    if slug != pretty_title {
        Some(slug)
    } else if folder != pretty_title {
        Some(folder.to_string())
    } else {
        None
    }
}
