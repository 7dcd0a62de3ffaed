//! Configuration file management
//!
//! Loads TOML configuration files and provides application settings.
//! Default config path: ~/.config/zipai/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_CHAR_SPACING, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_PADDING,
    DEFAULT_TEXT_COLOR, DEFAULT_WIDTH,
};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub fonts: FontConfig,
    /// Default render parameters
    pub render: RenderConfig,
}

/// Font settings
///
/// Each font slot accepts a list of specifiers tried in order. A specifier
/// is either a file name resolved against `assets_dir`, an absolute path,
/// or a family name searched via fontconfig. Multiple specifiers per slot
/// tolerate inconsistent font-file metadata across platforms: the same
/// file may be known by its postscript name, family name, or a localized
/// name depending on the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Directory holding bundled font assets
    pub assets_dir: String,
    /// Primary font: decorative/calligraphic style for the main look
    pub primary: Vec<String>,
    /// Fallback font: standard kai-style with broad hanzi coverage
    pub fallback: Vec<String>,
}

/// Default render parameters (used by the CLI; library callers pass
/// explicit options)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width (pixels)
    pub width: u32,
    /// Canvas height (pixels)
    pub height: u32,
    /// Requested font size (pixels, soft upper bound)
    pub font_size: f32,
    /// Background color (RRGGBB)
    pub background: String,
    /// Text color (RRGGBB)
    pub text_color: String,
    /// Canvas padding (pixels)
    pub padding: u32,
    /// Vertical gap between characters (pixels)
    pub spacing: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets/fonts".to_string(),
            primary: vec![
                "MaShanZheng-Regular.ttf".to_string(),
                "Ma Shan Zheng".to_string(),
                "MaShanZheng-Regular".to_string(),
            ],
            fallback: vec![
                "LXGWWenKai-Regular.ttf".to_string(),
                "LXGW WenKai".to_string(),
                "Kaiti SC".to_string(),
                "AR PL UKai CN".to_string(),
            ],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            background: DEFAULT_BACKGROUND.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            padding: DEFAULT_PADDING,
            spacing: DEFAULT_CHAR_SPACING,
        }
    }
}

impl Config {
    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. ZIPAI_CONFIG environment variable
        if let Ok(path) = std::env::var("ZIPAI_CONFIG") {
            let p = std::path::Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/zipai/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("zipai").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        None
    }

    /// Load configuration with priority:
    /// 1. ZIPAI_CONFIG environment variable
    /// 2. ~/.config/zipai/config.toml (user config)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(path.to_string_lossy().as_ref()) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// Write default config to the user config path (for template generation)
    pub fn write_default_config() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Cannot determine user config directory")?
            .join("zipai");
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;

        let config_path = config_dir.join("config.toml");
        let content =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.render.width > 0);
        assert!(cfg.render.height > 0);
        assert!(cfg.render.font_size > 0.0);
        assert!(!cfg.fonts.primary.is_empty());
        assert!(!cfg.fonts.fallback.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [render]
            width = 600
            "#,
        )
        .unwrap();
        assert_eq!(cfg.render.width, 600);
        assert_eq!(cfg.render.height, DEFAULT_HEIGHT);
        assert_eq!(cfg.render.background, DEFAULT_BACKGROUND);
    }
}
