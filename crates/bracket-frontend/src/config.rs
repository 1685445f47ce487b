//! Application configuration
//!
//! Resolver and render settings are read from a RON file. Missing sections
//! fall back to their defaults; an unreadable file falls back entirely.

use std::path::Path;

use bracket_core::{RenderSettings, ResolveConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Anchor resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,
    /// Tessellation settings for the scene
    #[serde(default)]
    pub render: RenderSettings,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.render = config.render.sanitized();
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::new();
        };
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config file {:?}: {}", path, e);
            Self::new()
        })
    }
}
