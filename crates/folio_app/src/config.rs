//! Folio configuration file handling

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration (folio.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub sections: SectionsConfig,
}

/// Logical viewport size
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Headless frame loop settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Probe sampling interval in frames
    #[serde(default = "default_probe_every")]
    pub probe_every_frames: u32,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_probe_every() -> u32 {
    4
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            probe_every_frames: default_probe_every(),
        }
    }
}

/// Section heights in logical pixels
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SectionsConfig {
    #[serde(default = "default_hero_height")]
    pub hero_height: f32,
    #[serde(default = "default_about_height")]
    pub about_height: f32,
    #[serde(default = "default_skills_height")]
    pub skills_height: f32,
}

fn default_hero_height() -> f32 {
    800.0
}

fn default_about_height() -> f32 {
    1400.0
}

fn default_skills_height() -> f32 {
    2000.0
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            hero_height: default_hero_height(),
            about_height: default_about_height(),
            skills_height: default_skills_height(),
        }
    }
}

impl FolioConfig {
    /// Load configuration from a file, or from `folio.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("folio.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            bail!("No folio.toml found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and rates the page cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            bail!("viewport dimensions must be positive");
        }
        if self.runtime.tick_ms == 0 {
            bail!("runtime.tick_ms must be > 0");
        }
        let sections = &self.sections;
        if [sections.hero_height, sections.about_height, sections.skills_height]
            .iter()
            .any(|h| *h <= 0.0)
        {
            bail!("section heights must be positive");
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FolioConfig::from_toml("").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.runtime.tick_ms, 16);
    }

    #[test]
    fn test_partial_tables_fill_defaults() {
        let config = FolioConfig::from_toml(
            r#"
            [viewport]
            height = 900.0

            [sections]
            skills_height = 2400.0
            "#,
        )
        .unwrap();
        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.viewport.height, 900.0);
        assert_eq!(config.sections.skills_height, 2400.0);
        assert_eq!(config.sections.hero_height, 800.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(FolioConfig::from_toml("[runtime]\ntick_ms = 0").is_err());
        assert!(FolioConfig::from_toml("[viewport]\nwidth = -1.0").is_err());
        assert!(FolioConfig::from_toml("[viewport]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FolioConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(FolioConfig::from_toml(&text).unwrap(), config);
    }
}
