//! Configuration management with file persistence
//!
//! Persists the per-user matching toggles and session sizing to a TOML
//! file under the platform config directory, with keyed get/set access
//! for the CLI.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::evaluate::MatchSettings;

/// Evoke configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchSettings,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub prompt_count: usize,
    pub min_subjects: usize,
    pub min_profile_fields: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchSettings::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt_count: 5,
            min_subjects: 2,
            min_profile_fields: 5,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("EVOKE_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("evoke")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Return default config without creating file
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session.prompt_count == 0 {
            return Err(anyhow!("session.prompt_count must be at least 1"));
        }
        if self.session.min_subjects < 2 {
            return Err(anyhow!(
                "session.min_subjects must be at least 2 (prompt generation reuses a second contact)"
            ));
        }
        if self.session.min_profile_fields == 0 {
            return Err(anyhow!("session.min_profile_fields must be at least 1"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            // Matching strategy toggles
            "matching.use_acceptable_alternatives" => {
                Ok(self.matching.use_acceptable_alternatives.to_string())
            }
            "matching.use_partial_substring" => {
                Ok(self.matching.use_partial_substring.to_string())
            }
            "matching.use_word_overlap" => Ok(self.matching.use_word_overlap.to_string()),
            "matching.use_stop_word_filtering" => {
                Ok(self.matching.use_stop_word_filtering.to_string())
            }
            "matching.use_synonyms" => Ok(self.matching.use_synonyms.to_string()),
            "matching.use_first_name_only" => Ok(self.matching.use_first_name_only.to_string()),

            // Session sizing
            "session.prompt_count" => Ok(self.session.prompt_count.to_string()),
            "session.min_subjects" => Ok(self.session.min_subjects.to_string()),
            "session.min_profile_fields" => Ok(self.session.min_profile_fields.to_string()),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `evoke config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let parse_bool = |value: &str| -> anyhow::Result<bool> {
            value
                .parse()
                .with_context(|| format!("Invalid boolean value: {} (use true or false)", value))
        };

        match key {
            // Matching strategy toggles
            "matching.use_acceptable_alternatives" => {
                self.matching.use_acceptable_alternatives = parse_bool(value)?;
            }
            "matching.use_partial_substring" => {
                self.matching.use_partial_substring = parse_bool(value)?;
            }
            "matching.use_word_overlap" => {
                self.matching.use_word_overlap = parse_bool(value)?;
            }
            "matching.use_stop_word_filtering" => {
                self.matching.use_stop_word_filtering = parse_bool(value)?;
            }
            "matching.use_synonyms" => {
                self.matching.use_synonyms = parse_bool(value)?;
            }
            "matching.use_first_name_only" => {
                self.matching.use_first_name_only = parse_bool(value)?;
            }

            // Session sizing
            "session.prompt_count" => {
                self.session.prompt_count = value
                    .parse()
                    .with_context(|| format!("Invalid prompt_count value: {}", value))?;
            }
            "session.min_subjects" => {
                self.session.min_subjects = value
                    .parse()
                    .with_context(|| format!("Invalid min_subjects value: {}", value))?;
            }
            "session.min_profile_fields" => {
                self.session.min_profile_fields = value
                    .parse()
                    .with_context(|| format!("Invalid min_profile_fields value: {}", value))?;
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `evoke config list` to see available keys.",
                    key
                ));
            }
        }

        self.validate()
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "matching.use_acceptable_alternatives",
            "matching.use_partial_substring",
            "matching.use_word_overlap",
            "matching.use_stop_word_filtering",
            "matching.use_synonyms",
            "matching.use_first_name_only",
            "session.prompt_count",
            "session.min_subjects",
            "session.min_profile_fields",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}
