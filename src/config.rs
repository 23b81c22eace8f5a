use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// Settings for the verify command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// Paths searched for mapping tables when none are given on the CLI
    #[serde(default = "default_table_paths")]
    pub default_paths: Vec<String>,

    /// Glob patterns for table files to skip during discovery
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// External resolver command template ("{}" is replaced with the
    /// abbreviation); empty means the CLI must be given --resolver
    #[serde(default)]
    pub resolver: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            default_paths: default_table_paths(),
            ignore_patterns: Vec::new(),
            resolver: String::new(),
        }
    }
}

// Default function for serde
fn default_table_paths() -> Vec<String> {
    vec!["abbrevs".to_string()]
}

impl Config {
    /// Load configuration from file, or use defaults if not found
    pub fn load() -> Result<Self> {
        // Try to load from config.yaml in current directory
        let config_path = Path::new("config.yaml");

        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .context("Failed to read config.yaml")?;
            let config: Config = serde_yaml::from_str(&contents)
                .context("Failed to parse config.yaml")?;
            Ok(config)
        } else {
            // Use defaults if no config file exists
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_absent() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.verify.default_paths, vec!["abbrevs"]);
        assert!(config.verify.ignore_patterns.is_empty());
        assert!(config.verify.resolver.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let yaml = "verify:\n  resolver: \"lldb-resolve {}\"\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.verify.resolver, "lldb-resolve {}");
        assert_eq!(config.verify.default_paths, vec!["abbrevs"]);
    }
}
