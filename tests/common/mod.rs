#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use mapman::manifest::Manifest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const REPOSITORY: &str = "octo/maps";
pub const RAW_BASE: &str = "https://raw.githubusercontent.com/octo/maps/main/";

/// Temporary repository with a `campaigns/` directory.
pub struct TestRepo {
    pub temp_dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("campaigns"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("maps.json")
    }

    /// Writes `content` to `campaigns/<relative>`, creating parent directories.
    pub fn write_asset(&self, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.path().join("campaigns").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_manifest(&self, json: &str) -> Result<()> {
        fs::write(self.manifest_path(), json)?;
        Ok(())
    }

    pub fn read_manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.manifest_path())
    }

    /// `mapman` command rooted at this repository with a fixed identity.
    pub fn mapman(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("mapman")?;
        cmd.env(mapman::REPOSITORY_ENV, REPOSITORY)
            .env_remove(mapman::telemetry::LOG_ENV)
            .arg("-C")
            .arg(self.path());
        Ok(cmd)
    }

    /// `mapman` command with no identity source available.
    pub fn mapman_without_identity(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("mapman")?;
        cmd.env_remove(mapman::REPOSITORY_ENV)
            .env_remove(mapman::telemetry::LOG_ENV)
            .env("GIT_CEILING_DIRECTORIES", self.path())
            .arg("-C")
            .arg(self.path());
        Ok(cmd)
    }
}
