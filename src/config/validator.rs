use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Flags configuration keys that mapman does not recognize
pub struct ConfigValidator {
    /// Set of valid configuration fields
    known_fields: HashSet<&'static str>,
    /// Section names that may hold fields
    known_sections: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_sections = HashSet::from(["paths", "scan", "remote"]);
        let known_fields = HashSet::from([
            "paths.campaigns",
            "paths.manifest",
            "scan.map_patterns",
            "scan.mod_patterns",
            "scan.mods_dir",
            "remote.raw_base",
            "remote.branch",
            "remote.repository",
        ]);

        Self {
            known_fields,
            known_sections,
        }
    }

    /// Validate a configuration file and warn about unknown fields
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        let unknown = self.unknown_fields(config_path)?;

        if !unknown.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in unknown {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Lists dotted keys in the file that are not recognized
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn unknown_fields(&self, config_path: &Path) -> Result<Vec<String>> {
        if !config_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Table = toml::from_str(&content)?;

        let mut unknown = Vec::new();
        for (section, value) in &parsed {
            match value {
                toml::Value::Table(fields) if self.known_sections.contains(section.as_str()) => {
                    for key in fields.keys() {
                        let full_key = format!("{section}.{key}");
                        if !self.known_fields.contains(full_key.as_str()) {
                            unknown.push(full_key);
                        }
                    }
                }
                _ => unknown.push(section.clone()),
            }
        }

        unknown.sort();
        Ok(unknown)
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
