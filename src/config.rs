use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub changelog: ChangelogConfig,
}

/// Changelog extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Fence tags that mark a changelog block in a pull request body
    pub block_tags: Vec<String>,
    /// Glob patterns for pull request titles to leave out entirely
    /// (release chores, dependency bumps and the like)
    pub exclude_title_patterns: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            block_tags: vec!["changelog".to_string(), "changes".to_string()],
            exclude_title_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Load configuration from the default location (.relnotes/config.yml)
    pub fn load_default() -> Result<Self> {
        Self::load(".relnotes/config.yml")
    }

    /// Check if a pull request title is excluded from the changelog
    pub fn should_skip_title(&self, title: &str) -> bool {
        for pattern in &self.changelog.exclude_title_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(title) {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.changelog.block_tags, vec!["changelog", "changes"]);
        assert!(config.changelog.exclude_title_patterns.is_empty());
    }

    #[test]
    fn test_should_skip_title() {
        let config = Config {
            changelog: ChangelogConfig {
                exclude_title_patterns: vec![
                    "Release *".to_string(),
                    "Bump *".to_string(),
                ],
                ..Default::default()
            },
        };

        assert!(config.should_skip_title("Release v1.2.3"));
        assert!(config.should_skip_title("Bump serde to 1.0.200"));
        assert!(!config.should_skip_title("Fix uptime calculation"));
    }

    #[test]
    fn test_no_patterns_skips_nothing() {
        let config = Config::default();
        assert!(!config.should_skip_title("Release v1.2.3"));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
changelog:
  block_tags:
    - changelog
  exclude_title_patterns:
    - "Release *"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.changelog.block_tags.len(), 1);
        assert_eq!(config.changelog.exclude_title_patterns.len(), 1);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/config.yml").unwrap();
        assert_eq!(config.changelog.block_tags.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "changelog:\n  exclude_title_patterns:\n    - 'Release *'\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.changelog.exclude_title_patterns, vec!["Release *"]);
        // Untouched sections keep their defaults
        assert_eq!(config.changelog.block_tags.len(), 2);
    }
}
