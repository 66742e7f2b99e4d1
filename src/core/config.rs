use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::overlay_renderer::RenderStyle;
use crate::models::detection::DetectorConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Hand landmark detector settings
    pub detector: DetectorConfig,
    /// Flip frames horizontally before detection (selfie view)
    pub mirror_input: bool,
    /// Stroke thickness in pixels
    pub line_thickness: u32,
    /// Fingertip marker radius in pixels
    pub cursor_radius: u32,
    /// TrueType/OpenType font for the status line, replacing the bundled one
    pub font_path: Option<PathBuf>,
    /// Camera frame rate to request
    pub target_fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            mirror_input: true,
            line_thickness: 5,
            cursor_radius: 10,
            font_path: None,
            target_fps: 30,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it with defaults if missing
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let detector = &self.detector;

        if !(0.0..=1.0).contains(&detector.min_detection_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_detection_confidence {} must be between 0.0 and 1.0",
                detector.min_detection_confidence
            )));
        }

        if !(0.0..=1.0).contains(&detector.min_tracking_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_tracking_confidence {} must be between 0.0 and 1.0",
                detector.min_tracking_confidence
            )));
        }

        if detector.max_num_hands != 1 {
            return Err(ConfigError::Invalid(format!(
                "max_num_hands {} is not supported, only one hand is tracked",
                detector.max_num_hands
            )));
        }

        if self.line_thickness == 0 || self.line_thickness > 50 {
            return Err(ConfigError::Invalid(format!(
                "line_thickness {} must be between 1 and 50",
                self.line_thickness
            )));
        }

        if self.cursor_radius == 0 || self.cursor_radius > 100 {
            return Err(ConfigError::Invalid(format!(
                "cursor_radius {} must be between 1 and 100",
                self.cursor_radius
            )));
        }

        if self.target_fps == 0 || self.target_fps > 120 {
            return Err(ConfigError::Invalid(format!(
                "target_fps {} must be between 1 and 120",
                self.target_fps
            )));
        }

        if let Some(font_path) = &self.font_path {
            if !font_path.exists() {
                return Err(ConfigError::Invalid(format!(
                    "font_path {} does not exist",
                    font_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> ConfigResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            line_thickness: self.line_thickness,
            cursor_radius: self.cursor_radius,
        }
    }

    /// Get the configuration file path
    pub fn get_config_path() -> ConfigResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDirectory)?;

        let mut path = PathBuf::from(home);
        path.push(".air_canvas");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
