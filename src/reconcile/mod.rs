//! Merging scanned campaigns with the prior manifest.
//!
//! For every campaign directory the reconciler decides, per asset, whether it
//! is new, changed or unchanged, keeps release-only entries that have no file,
//! drops entries whose file disappeared, and bumps the campaign version once
//! if anything in its asset list moved. The rules themselves live in
//! [`merge`]; this module feeds them with digests, URLs and prior entries.

pub mod merge;
pub mod report;

pub use merge::{AssetChange, PriorAsset};
pub use report::CampaignReport;

use crate::manifest::{AssetEntry, CampaignBlock, CampaignIndex, Manifest};
use crate::remote::FetchBase;
use crate::scanner::CampaignDir;
use crate::utils::{hash::hash_file, paths::to_repo_relative};
use crate::version;
use anyhow::Result;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{Level, debug, info, span};

/// Result of reconciling a single campaign.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The rebuilt block
    pub block: CampaignBlock,
    /// What changed
    pub report: CampaignReport,
}

/// Result of reconciling every campaign.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// The rebuilt manifest
    pub manifest: Manifest,
    /// One report per campaign, in manifest order
    pub reports: Vec<CampaignReport>,
    /// Titles of prior campaigns with no directory on disk
    pub removed: Vec<String>,
}

impl Outcome {
    /// True if any campaign was added, bumped or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.removed.is_empty() || self.reports.iter().any(|r| r.is_new() || r.bumped)
    }
}

/// Rebuilds campaign blocks from disk state and prior entries.
pub struct Reconciler<'a> {
    /// Root that asset URLs are relative to
    repo_root: &'a Path,
    /// Base URL for asset fetches
    fetch: &'a FetchBase,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler building URLs against `repo_root`.
    #[must_use]
    pub const fn new(repo_root: &'a Path, fetch: &'a FetchBase) -> Self {
        Self { repo_root, fetch }
    }

    /// Reconciles every scanned campaign against `prior`.
    ///
    /// # Errors
    ///
    /// Returns an error if any asset cannot be hashed or lies outside the
    /// repository root.
    pub fn reconcile_all(&self, campaigns: &[CampaignDir], prior: &Manifest) -> Result<Outcome> {
        let index = CampaignIndex::build(&prior.campaigns);
        let mut matched: HashSet<*const CampaignBlock> = HashSet::new();
        let mut outcome = Outcome::default();

        for campaign in campaigns {
            let prior_block = index.lookup(&campaign.folder);
            if let Some(block) = prior_block {
                matched.insert(std::ptr::from_ref(block));
            }

            let Reconciliation { block, report } = self.reconcile(campaign, prior_block)?;
            outcome.manifest.campaigns.push(block);
            outcome.reports.push(report);
        }

        outcome.removed = prior
            .campaigns
            .iter()
            .filter(|block| !matched.contains(&std::ptr::from_ref(*block)))
            .map(|block| block.title.clone())
            .collect();
        for title in &outcome.removed {
            info!(title = %title, "Campaign no longer on disk; dropping");
        }

        Ok(outcome)
    }

    /// Reconciles one campaign directory against its prior block, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset cannot be hashed or lies outside the
    /// repository root.
    pub fn reconcile(
        &self,
        campaign: &CampaignDir,
        prior: Option<&CampaignBlock>,
    ) -> Result<Reconciliation> {
        let span = span!(Level::DEBUG, "reconcile_campaign", folder = %campaign.folder);
        let _guard = span.enter();

        let pretty_title = prior
            .map(|block| block.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(&campaign.folder)
            .to_string();

        // Duplicate names in the prior list collapse to the last occurrence
        let prior_assets: BTreeMap<&str, &AssetEntry> = prior
            .map(|block| block.maps.iter().map(|e| (e.name.as_str(), e)).collect())
            .unwrap_or_default();

        let mut report = CampaignReport::new(&campaign.folder);
        report.previous_version = prior.map(|block| block.version.clone());

        let mut entries = Vec::with_capacity(campaign.assets.len() + prior_assets.len());
        for asset in &campaign.assets {
            let digest = hash_file(&asset.path)?;
            let url = self.fetch.url_for(&to_repo_relative(&asset.path, self.repo_root)?);
            let found = PriorAsset::from(prior_assets.get(asset.name.as_str()).copied());

            let (entry, change) = merge::merge_asset(found, &asset.name, &digest, url);
            match change {
                AssetChange::Added => info!(asset = %entry.name, version = %entry.version, "New asset"),
                AssetChange::Changed => {
                    info!(asset = %entry.name, version = %entry.version, "Asset content changed");
                }
                AssetChange::Unchanged => debug!(asset = %entry.name, "Asset unchanged"),
            }
            report.record(&asset.name, change);
            entries.push(entry);
        }

        let on_disk: HashSet<&str> = campaign.assets.iter().map(|a| a.name.as_str()).collect();
        for (name, entry) in &prior_assets {
            if on_disk.contains(name) {
                continue;
            }
            if entry.is_release_asset() {
                debug!(asset = %name, "Keeping release asset without file");
                report.retained.push((*name).to_string());
                entries.push((*entry).clone());
            } else {
                info!(asset = %name, "Asset no longer on disk; dropping");
                report.dropped.push((*name).to_string());
            }
        }

        merge::sort_entries(&mut entries);

        let campaign_version = match prior {
            None => version::INITIAL.to_string(),
            Some(block) => {
                let previous: Vec<&AssetEntry> = prior_assets.values().copied().collect();
                if merge::campaign_changed(&entries, &previous) {
                    report.bumped = true;
                    version::bump_minor(Some(&block.version))
                } else {
                    version::normalize(&block.version)
                }
            }
        };
        report.version.clone_from(&campaign_version);

        let block = CampaignBlock {
            asset: CampaignBlock::cover_asset(&pretty_title),
            folder: merge::derive_folder(&pretty_title, &campaign.folder),
            title: pretty_title,
            version: campaign_version,
            maps: entries,
        };
        debug!(title = %block.title, version = %block.version, "Campaign reconciled");

        Ok(Reconciliation { block, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RepoIdentity;
    use crate::scanner::{AssetKind, ScannedAsset};
    use crate::utils::hash::hash_bytes;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        temp_dir: TempDir,
        fetch: FetchBase,
    }

    impl Fixture {
        fn new() -> Self {
            let identity = RepoIdentity {
                owner: "octo".into(),
                repo: "maps".into(),
            };
            Self {
                temp_dir: TempDir::new().unwrap(),
                fetch: FetchBase::new("https://raw.example.com", &identity, "main"),
            }
        }

        fn root(&self) -> &Path {
            self.temp_dir.path()
        }

        fn campaign(&self, folder: &str, files: &[(&str, &str)]) -> CampaignDir {
            let dir = self.root().join("campaigns").join(folder);
            fs::create_dir_all(&dir).unwrap();
            let assets = files
                .iter()
                .map(|(name, content)| {
                    let path = dir.join(name);
                    fs::write(&path, content).unwrap();
                    ScannedAsset {
                        name: (*name).to_string(),
                        path,
                        kind: AssetKind::Map,
                    }
                })
                .collect();
            CampaignDir {
                folder: folder.to_string(),
                path: dir,
                assets,
            }
        }

        fn reconciler(&self) -> Reconciler<'_> {
            Reconciler::new(self.root(), &self.fetch)
        }
    }

    fn prior_block(title: &str, version: &str, maps: Vec<AssetEntry>) -> CampaignBlock {
        CampaignBlock {
            title: title.into(),
            version: version.into(),
            asset: CampaignBlock::cover_asset(title),
            maps,
            folder: None,
        }
    }

    #[test]
    fn test_new_campaign() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("desertstrike", &[("map1.SC2Map", "one"), ("map2.SC2Map", "two")]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, None)?;
        assert_eq!(block.title, "desertstrike");
        assert_eq!(block.version, "1.0");
        assert_eq!(block.asset, "desertstrike.png");
        assert_eq!(block.folder, None);
        assert_eq!(block.maps.len(), 2);
        assert!(block.maps.iter().all(|m| m.version == "1.0"));
        assert_eq!(block.maps[0].sha256, hash_bytes(b"one"));
        assert_eq!(
            block.maps[0].url.as_deref(),
            Some("https://raw.example.com/octo/maps/main/campaigns/desertstrike/map1.SC2Map")
        );
        assert!(report.is_new());
        assert_eq!(report.added.len(), 2);

        Ok(())
    }

    #[test]
    fn test_changed_asset_bumps_asset_and_campaign() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("desertstrike", &[("map1.SC2Map", "new content")]);
        let prior = prior_block("desertstrike", "2.4", vec![AssetEntry::new(
            "map1.SC2Map",
            "1.2",
            "abc",
        )]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        assert_eq!(block.maps[0].version, "1.3");
        assert_eq!(block.maps[0].sha256, hash_bytes(b"new content"));
        assert_eq!(block.version, "2.5");
        assert!(report.bumped);
        assert_eq!(report.changed, vec!["map1.SC2Map"]);

        Ok(())
    }

    #[test]
    fn test_unchanged_campaign_keeps_version() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("alpha", &[("a.SC2Map", "A")]);
        let prior = prior_block("alpha", "3.1", vec![AssetEntry::new(
            "a.SC2Map",
            "1.4",
            hash_bytes(b"A"),
        )]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        assert_eq!(block.version, "3.1");
        assert_eq!(block.maps[0].version, "1.4");
        assert!(!report.bumped);
        assert_eq!(report.unchanged, 1);

        Ok(())
    }

    #[test]
    fn test_removed_file_bumps_campaign_once() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("alpha", &[("a.SC2Map", "A"), ("b.SC2Map", "B2")]);
        let prior = prior_block("alpha", "1.0", vec![
            AssetEntry::new("a.SC2Map", "1.0", hash_bytes(b"A")),
            AssetEntry::new("b.SC2Map", "1.0", hash_bytes(b"B")),
            AssetEntry::new("gone.SC2Map", "1.0", "zz"),
        ]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        assert_eq!(block.version, "1.1");
        assert_eq!(block.maps.len(), 2);
        assert_eq!(report.dropped, vec!["gone.SC2Map"]);

        Ok(())
    }

    #[test]
    fn test_renamed_asset_with_same_content_bumps_campaign() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("alpha", &[("new.SC2Map", "X")]);
        let prior = prior_block("alpha", "2.0", vec![AssetEntry::new(
            "old.SC2Map",
            "1.0",
            hash_bytes(b"X"),
        )]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        let names: Vec<_> = block.maps.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["new.SC2Map"]);
        assert_eq!(block.maps[0].version, "1.0");
        assert_eq!(block.version, "2.1");
        assert!(report.bumped);
        assert_eq!(report.dropped, vec!["old.SC2Map"]);

        Ok(())
    }

    #[test]
    fn test_release_asset_retained_without_file() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("alpha", &[("a.SC2Map", "A")]);
        let mut release = AssetEntry::new("Big.SC2Mod", "5.2", "feed");
        release.release_asset = Some(true);
        release.url = Some("https://releases.example.com/Big.SC2Mod".into());
        let prior = prior_block("alpha", "1.1", vec![
            AssetEntry::new("a.SC2Map", "1.0", hash_bytes(b"A")),
            release.clone(),
        ]);

        let Reconciliation { block, report } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        assert_eq!(block.version, "1.1");
        assert_eq!(block.maps.len(), 2);
        assert!(block.maps.contains(&release));
        assert_eq!(report.retained, vec!["Big.SC2Mod"]);

        Ok(())
    }

    #[test]
    fn test_launcher_sorted_first() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("alpha", &[
            ("a.SC2Map", "a"),
            ("Campaign Launcher.SC2Map", "l"),
            ("B.SC2Map", "b"),
        ]);

        let Reconciliation { block, .. } = fx.reconciler().reconcile(&campaign, None)?;
        let names: Vec<_> = block.maps.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Campaign Launcher.SC2Map", "a.SC2Map", "B.SC2Map"]);
        assert_eq!(
            block.maps[0].url.as_deref(),
            Some("https://raw.example.com/octo/maps/main/campaigns/alpha/Campaign%20Launcher.SC2Map")
        );

        Ok(())
    }

    #[test]
    fn test_pretty_title_and_folder_from_prior() -> Result<()> {
        let fx = Fixture::new();
        let campaign = fx.campaign("desertstrike", &[]);
        let mut prior = prior_block("Desert Strike!", "1.0", Vec::new());
        prior.folder = Some("desertstrike".into());

        let Reconciliation { block, .. } = fx.reconciler().reconcile(&campaign, Some(&prior))?;
        assert_eq!(block.title, "Desert Strike!");
        assert_eq!(block.asset, "Desert Strike!.png");
        assert_eq!(block.folder.as_deref(), Some("desertstrike"));
        assert_eq!(block.version, "1.0");

        Ok(())
    }

    #[test]
    fn test_asset_outside_root_is_error() {
        let fx = Fixture::new();
        let elsewhere = TempDir::new().unwrap();
        let path: PathBuf = elsewhere.path().join("x.SC2Map");
        fs::write(&path, "x").unwrap();
        let campaign = CampaignDir {
            folder: "x".into(),
            path: elsewhere.path().to_path_buf(),
            assets: vec![ScannedAsset {
                name: "x.SC2Map".into(),
                path,
                kind: AssetKind::Map,
            }],
        };

        assert!(fx.reconciler().reconcile(&campaign, None).is_err());
    }

    #[test]
    fn test_reconcile_all_matches_by_slug_and_reports_removed() -> Result<()> {
        let fx = Fixture::new();
        let campaigns = vec![fx.campaign("Night-Ops", &[("n.SC2Map", "n")])];
        let prior = Manifest {
            campaigns: vec![
                prior_block("Night Ops", "1.3", vec![AssetEntry::new(
                    "n.SC2Map",
                    "1.0",
                    hash_bytes(b"n"),
                )]),
                prior_block("Retired", "1.0", Vec::new()),
            ],
        };

        let outcome = fx.reconciler().reconcile_all(&campaigns, &prior)?;
        let block = &outcome.manifest.campaigns[0];
        assert_eq!(block.title, "Night Ops");
        assert_eq!(block.version, "1.3");
        assert_eq!(block.folder.as_deref(), Some("nightops"));
        assert_eq!(outcome.removed, vec!["Retired"]);
        assert!(outcome.has_changes());

        Ok(())
    }
}
