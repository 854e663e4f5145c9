//! Display configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults (512 x 512, depth 8)
//! 2. An optional TOML file, `spd_display.toml` unless another path is given
//! 3. Environment variables (`SPD_DISPLAY_WIDTH=640`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "spd_display.toml";
pub const ENV_PREFIX: &str = "SPD_DISPLAY_";

/// When drawing primitives reach the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentMode {
    /// Present after every clear, plot and line.
    #[default]
    Immediate,
    /// Present only on clear, open, close and explicit `present()` calls.
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Requested color depth in bits per pixel. Frames are always RGBA8; this is reported only.
    pub depth: u32,
    /// Synchronize presents with the display refresh
    pub vsync: bool,
    pub present_mode: PresentMode,
    /// Sleep between empty event polls while waiting to close
    pub poll_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "SPD Display".to_string(),
            width: 512,
            height: 512,
            depth: 8,
            vsync: true,
            present_mode: PresentMode::Immediate,
            poll_interval_ms: 10,
        }
    }
}

impl DisplayConfig {
    /// Load configuration from `spd_display.toml` in the working directory and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific TOML file. A missing file is not an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        let path = path.as_ref();
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if path.exists() {
            log::debug!("Loading display config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Same settings with a different window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}
