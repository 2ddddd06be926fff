use eds_viewer_engine::{DEFAULT_CONTENT_URL, DEFAULT_SITE_URL, EdsConfig, EdsConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
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

    #[error("Invalid site configuration: {0}")]
    InvalidSite(#[from] EdsConfigError),
}

/// Which EDS site to show.
///
/// `site_url` is the published site origin, used to resolve relative links
/// and tell internal from external ones. `content_url` is the HTML-to-JSON
/// service root that serves the site's pages as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site_url: String,
    pub content_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            content_url: DEFAULT_CONTENT_URL.to_string(),
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

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Allow `$VAR` / `${VAR}` references, e.g. for per-branch preview hosts
        config.site_url = Self::expand_value(&config.site_url);
        config.content_url = Self::expand_value(&config.content_url);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
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
        let config_dir = shellexpand::tilde("~/.config/eds-viewer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Validate the URLs and build the engine configuration.
    pub fn to_eds_config(&self) -> Result<EdsConfig, ConfigError> {
        Ok(EdsConfig::new(&self.site_url, &self.content_url)?)
    }

    fn expand_value(value: &str) -> String {
        match shellexpand::full(value) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => value.to_string(),
        }
    }
}
