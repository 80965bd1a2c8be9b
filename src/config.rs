use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::asset::AssetKind;
use crate::package::ConvertOptions;

const APP_NAME: &str = "asset-semver";

const CONFIG_FILE_NAME: &str = "config.json";

const LOG_FILE_NAME: &str = "asset-semver.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Converter configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub assets: AssetsConfig,
    pub conversion: ConversionConfig,
}

/// Per asset type switches
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub npm: AssetConfig,
    pub bower: AssetConfig,
}

impl AssetsConfig {
    pub fn is_enabled(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Npm => self.npm.enabled,
            AssetKind::Bower => self.bower.enabled,
        }
    }
}

/// Individual asset type configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub enabled: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Manifest conversion settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionConfig {
    pub include_dev_dependencies: bool,
    /// Asset manifest key -> composer `extra` key
    pub extra_keys: IndexMap<String, String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            include_dev_dependencies: true,
            extra_keys: IndexMap::new(),
        }
    }
}

impl ConversionConfig {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            include_dev_dependencies: self.include_dev_dependencies,
            extra_keys: self.extra_keys.clone(),
        }
    }
}

impl Config {
    /// Load the config from `path`, or from the default location.
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config directory for asset-semver.
/// Uses $XDG_CONFIG_HOME/asset-semver if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/asset-semver,
/// or ./asset-semver if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Returns the path to the data directory for asset-semver.
/// Uses $XDG_DATA_HOME/asset-semver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/asset-semver.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    app_dir(xdg_config_home, home_dir, ".config")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    app_dir(xdg_data_home, home_dir, ".local/share")
}

fn app_dir(xdg_home: Option<String>, home_dir: Option<PathBuf>, home_relative: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
