//! YAML configuration for the chanmatch engine.
//!
//! Embedders describe the store backend, the text engine, and orchestrator
//! tuning in a single YAML document and load it at startup. Platform-level
//! policy (eligibility rules, language whitelists, activity thresholds) is
//! the surrounding platform's configuration and reaches the engine through
//! the directory collaborators instead.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//!
//! store:
//!   backend: "in_memory"
//!
//! text:
//!   engine: "scratch"
//!
//! matching:
//!   fast_path: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ChanmatchConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub text: TextSection,

    #[serde(default)]
    pub matching: MatchingSection,
}

impl ChanmatchConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ChanmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            other => Err(ConfigLoadError::UnsupportedVersion(other.to_string())),
        }
    }
}

impl Default for ChanmatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            store: StoreSection::default(),
            text: TextSection::default(),
            matching: MatchingSection::default(),
        }
    }
}

/// Store backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendKind {
    #[default]
    InMemory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackendKind,
}

/// Full-text adapter selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextEngineKind {
    /// Stage candidate text per evaluation under a unique scratch key.
    #[default]
    Scratch,
    /// Evaluate against the supplied text in place.
    Direct,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct TextSection {
    #[serde(default)]
    pub engine: TextEngineKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MatchingSection {
    /// Whether existence mode uses the cheap language-only pre-selection.
    #[serde(default = "MatchingSection::default_fast_path")]
    pub fast_path: bool,
}

impl MatchingSection {
    fn default_fast_path() -> bool {
        true
    }
}

impl Default for MatchingSection {
    fn default() -> Self {
        Self {
            fast_path: Self::default_fast_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ChanmatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.backend, StoreBackendKind::InMemory);
        assert_eq!(config.text.engine, TextEngineKind::Scratch);
        assert!(config.matching.fast_path);
    }

    #[test]
    fn yaml_round_trip_with_overrides() {
        let yaml = r#"
version: "1.0"
name: "staging"
text:
  engine: "direct"
matching:
  fast_path: false
"#;
        let config = ChanmatchConfig::from_yaml(yaml).expect("parse");
        assert_eq!(config.name.as_deref(), Some("staging"));
        assert_eq!(config.text.engine, TextEngineKind::Direct);
        assert!(!config.matching.fast_path);
        // Omitted sections fall back to defaults.
        assert_eq!(config.store.backend, StoreBackendKind::InMemory);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let yaml = "version: \"2.0\"";
        assert!(matches!(
            ChanmatchConfig::from_yaml(yaml),
            Err(ConfigLoadError::UnsupportedVersion(_))
        ));
    }
}
