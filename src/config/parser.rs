use super::Config;
use anyhow::{Context, Result};
use std::path::{Component, Path};

pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    // Validate and return validation errors directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    for pattern in config.scan.map_patterns.iter().chain(&config.scan.mod_patterns) {
        if pattern.is_empty() {
            anyhow::bail!("Scan patterns cannot be empty");
        }
        glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid scan pattern: {pattern}"))?;
    }

    let mods_dir = Path::new(&config.scan.mods_dir);
    let single_component = matches!(
        mods_dir.components().collect::<Vec<_>>().as_slice(),
        [Component::Normal(_)]
    );
    if !single_component || config.scan.mods_dir.contains(['/', '\\']) {
        anyhow::bail!(
            "mods_dir must be a single directory name, got '{}'",
            config.scan.mods_dir
        );
    }

    let raw_base = config.remote.raw_base.as_str();
    if !(raw_base.starts_with("https://") || raw_base.starts_with("http://")) {
        anyhow::bail!("raw_base must be an http(s) URL, got '{raw_base}'");
    }

    if config.remote.branch.trim().is_empty() {
        anyhow::bail!("Branch cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() -> Result<()> {
        let config = parse_config_str(
            r#"
[paths]
manifest = "launcher/maps.json"

[remote]
repository = "octo/maps"
"#,
        )?;
        assert_eq!(config.paths.manifest, Path::new("launcher/maps.json"));
        assert_eq!(config.paths.campaigns, Path::new("campaigns"));
        assert_eq!(config.remote.repository.as_deref(), Some("octo/maps"));
        assert_eq!(config.remote.branch, "main");
        Ok(())
    }

    #[test]
    fn test_empty_config_is_default() -> Result<()> {
        assert_eq!(parse_config_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_pattern() {
        let err = parse_config_str("[scan]\nmap_patterns = [\"[unclosed\"]\n").unwrap_err();
        assert!(err.to_string().contains("Invalid scan pattern"));
    }

    #[test]
    fn test_rejects_empty_pattern() {
        assert!(parse_config_str("[scan]\nmod_patterns = [\"\"]\n").is_err());
    }

    #[test]
    fn test_rejects_nested_mods_dir() {
        assert!(parse_config_str("[scan]\nmods_dir = \"a/b\"\n").is_err());
        assert!(parse_config_str("[scan]\nmods_dir = \"..\"\n").is_err());
        assert!(parse_config_str("[scan]\nmods_dir = \"\"\n").is_err());
    }

    #[test]
    fn test_rejects_non_http_raw_base() {
        let err = parse_config_str("[remote]\nraw_base = \"ftp://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("raw_base"));
    }

    #[test]
    fn test_rejects_empty_branch() {
        assert!(parse_config_str("[remote]\nbranch = \" \"\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(parse_config_str("[paths\nmanifest = 1").is_err());
    }
}
