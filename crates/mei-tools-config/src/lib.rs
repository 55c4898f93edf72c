use mei_tools_engine::render::options::{MAX_SCALE, MIN_SCALE};
use mei_tools_engine::{HighlightColor, RenderOptions, ViewSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Scale {scale} in {config_path} is outside 20..=200")]
    InvalidScale { config_path: PathBuf, scale: u32 },

    #[error("Highlight color '{color}' in {config_path} is not a #rgb or #rrggbb value")]
    InvalidHighlightColor { config_path: PathBuf, color: String },
}

/// Rendering preferences. Missing keys fall back to their defaults, so a
/// file holding only `scale = 60` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scale: u32,
    pub paginate: bool,
    pub highlight_color: String,
    /// Staff count above which pagination is forced on.
    pub staff_threshold: usize,
    pub attach_retry_ms: u64,
    pub container_retry_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 45,
            paginate: true,
            highlight_color: "#0098F0".to_string(),
            staff_threshold: 100,
            attach_retry_ms: 50,
            container_retry_ms: 100,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if !(MIN_SCALE..=MAX_SCALE).contains(&config.scale) {
            return Err(ConfigError::InvalidScale {
                config_path: config_path.to_path_buf(),
                scale: config.scale,
            });
        }

        if config.highlight_color.parse::<HighlightColor>().is_err() {
            return Err(ConfigError::InvalidHighlightColor {
                config_path: config_path.to_path_buf(),
                color: config.highlight_color,
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The stored config, or the defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mei-tools");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Engine options for a newly opened document.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.scale.clamp(MIN_SCALE, MAX_SCALE),
            paginate: self.paginate,
            ..RenderOptions::default()
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            staff_threshold: self.staff_threshold,
            attach_retry: Duration::from_millis(self.attach_retry_ms),
            container_retry: Duration::from_millis(self.container_retry_ms),
        }
    }

    /// The configured colour, or the default when it does not parse. Files
    /// loaded through [`Config::load_from_path`] are already validated.
    pub fn highlight_color(&self) -> HighlightColor {
        self.highlight_color.parse().unwrap_or_default()
    }
}
