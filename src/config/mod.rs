pub mod parser;
pub mod validator;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    /// Which files count as campaign assets
    #[serde(default)]
    pub scan: ScanConfig,

    /// Where assets are fetched from
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    #[serde(default = "default_campaigns")]
    pub campaigns: PathBuf,
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Glob patterns for map files directly inside a campaign directory
    #[serde(default = "default_map_patterns")]
    pub map_patterns: Vec<String>,
    /// Glob patterns for mod files inside `mods_dir`
    #[serde(default = "default_mod_patterns")]
    pub mod_patterns: Vec<String>,
    #[serde(default = "default_mods_dir")]
    pub mods_dir: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteConfig {
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// `owner/repo`; used when neither `--repository` nor `GITHUB_REPOSITORY` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            campaigns: default_campaigns(),
            manifest: default_manifest(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            map_patterns: default_map_patterns(),
            mod_patterns: default_mod_patterns(),
            mods_dir: default_mods_dir(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            raw_base: default_raw_base(),
            branch: default_branch(),
            repository: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        parser::parse_config_file(path)
    }
}

// Default functions for serde
fn default_campaigns() -> PathBuf {
    PathBuf::from("campaigns")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("maps.json")
}

fn default_map_patterns() -> Vec<String> {
    vec!["*.SC2Map".to_string()]
}

fn default_mod_patterns() -> Vec<String> {
    vec!["*.SC2Mod".to_string()]
}

fn default_mods_dir() -> String {
    "mods".to_string()
}

fn default_raw_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.campaigns, PathBuf::from("campaigns"));
        assert_eq!(config.paths.manifest, PathBuf::from("maps.json"));
        assert_eq!(config.scan.map_patterns, vec!["*.SC2Map"]);
        assert_eq!(config.scan.mod_patterns, vec!["*.SC2Mod"]);
        assert_eq!(config.scan.mods_dir, "mods");
        assert_eq!(config.remote.raw_base, "https://raw.githubusercontent.com");
        assert_eq!(config.remote.branch, "main");
        assert_eq!(config.remote.repository, None);
    }

    #[test]
    fn test_load_missing_returns_default_without_writing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mapman.toml");
        assert_eq!(Config::load(&path)?, Config::default());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mapman.toml");
        std::fs::write(&path, "[remote]\nrepository = \"octo/maps\"\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.remote.repository.as_deref(), Some("octo/maps"));
        assert_eq!(config.remote.branch, "main");
        assert_eq!(config.scan, ScanConfig::default());
        Ok(())
    }
}
