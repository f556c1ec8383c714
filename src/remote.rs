//! Repository identity and fetch URL construction.
//!
//! Asset URLs point at the raw-content host of the repository the manifest
//! lives in. The `owner/repo` pair comes from, in order: an explicit value
//! (`--repository` or `GITHUB_REPOSITORY`), the `remote.repository` config
//! key, or the local `origin` remote. Failing all three is fatal.

pub mod errors;

pub use errors::IdentityError;

use crate::utils::url::encode_path;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;
use tracing::{debug, warn};

/// An `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    /// Account or organization.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(IdentityError::Malformed(s.to_string())),
        }
    }
}

/// Extracts `owner/repo` from a git remote URL.
///
/// Accepts anything ending in `<sep>owner/repo` or `<sep>owner/repo.git`,
/// where `<sep>` is `/` or `:`. This covers HTTPS, `ssh://` and scp-style
/// (`git@host:owner/repo.git`) remotes.
#[must_use]
pub fn parse_remote_url(url: &str) -> Option<RepoIdentity> {
    let url = url.trim();
    let (head, last) = url.rsplit_once('/')?;

    let repo = match last.strip_suffix(".git") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => last,
    };
    if repo.is_empty() {
        return None;
    }

    // The owner is the final '/'-delimited segment of `head`. Without any '/',
    // it is whatever follows the first ':' (scp-style remotes).
    let owner = match head.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => head.split_once(':').map(|(_, owner)| owner)?,
    };
    if owner.is_empty() {
        return None;
    }

    Some(RepoIdentity {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

/// Reads `remote.origin.url` from the git repository at `root`.
///
/// # Errors
///
/// Returns [`IdentityError::GitUnavailable`] if git cannot be spawned and
/// [`IdentityError::NoRemote`] if the key is unset or empty.
pub fn git_remote_url(root: &Path) -> Result<String, IdentityError> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .current_dir(root)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| IdentityError::GitUnavailable(e.to_string()))?;

    if !output.status.success() {
        return Err(IdentityError::NoRemote);
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(IdentityError::NoRemote);
    }
    Ok(url)
}

/// Determines the repository identity used for fetch URLs.
///
/// An explicit value without a `/` is ignored (with a warning) and resolution
/// continues; a malformed configured value is an error.
///
/// # Errors
///
/// Returns an [`IdentityError`] when no source yields an identity.
pub fn resolve_identity(
    explicit: Option<&str>,
    configured: Option<&str>,
    root: &Path,
) -> Result<RepoIdentity, IdentityError> {
    if let Some(value) = explicit.filter(|v| !v.trim().is_empty()) {
        match value.parse::<RepoIdentity>() {
            Ok(identity) => {
                debug!(%identity, "Repository identity from environment");
                return Ok(identity);
            }
            Err(_) => warn!(value, "Ignoring malformed repository identity"),
        }
    }

    if let Some(value) = configured {
        let identity = value.parse::<RepoIdentity>()?;
        debug!(%identity, "Repository identity from config");
        return Ok(identity);
    }

    let url = git_remote_url(root)?;
    let identity =
        parse_remote_url(&url).ok_or_else(|| IdentityError::UnrecognizedRemote(url.clone()))?;
    debug!(%identity, remote = %url, "Repository identity from git remote");
    Ok(identity)
}

/// Base URL that repository-relative asset paths are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBase {
    /// Always ends with `/`.
    base: String,
}

impl FetchBase {
    /// Builds `{raw_base}/{owner}/{repo}/{branch}/`.
    #[must_use]
    pub fn new(raw_base: &str, identity: &RepoIdentity, branch: &str) -> Self {
        Self {
            base: format!("{}/{identity}/{branch}/", raw_base.trim_end_matches('/')),
        }
    }

    /// The base URL, with trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Fetch URL for a forward-slash path relative to the repository root.
    #[must_use]
    pub fn url_for(&self, relative_path: &str) -> String {
        format!("{}{}", self.base, encode_path(relative_path))
    }
}

impl fmt::Display for FetchBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
