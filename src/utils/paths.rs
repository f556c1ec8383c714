use anyhow::{Context, Result};
use std::path::{Component, Path};

/// Returns `path` relative to `base` as a forward-slash string.
///
/// # Errors
///
/// Returns an error if `path` is not inside `base` or contains a component
/// that is not valid UTF-8.
pub fn to_repo_relative(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).with_context(|| {
        format!(
            "{} is not inside the repository root {}",
            path.display(),
            base.display()
        )
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .with_context(|| format!("Non UTF-8 path component in {}", path.display()))?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}

/// Final path component as an owned string (lossy for non UTF-8 names).
#[must_use]
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
