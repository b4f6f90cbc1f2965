//! Settings file loading and model artifact path resolution.
//!
//! Settings live in a small TOML file under the app root directory. The
//! model path can also be supplied through `DEMANDCAST_MODEL_PATH`, which
//! takes precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};

/// Name of the settings file inside the app root directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the model artifact path.
pub const MODEL_PATH_ENV: &str = "DEMANDCAST_MODEL_PATH";

/// Default artifact filename inside the app models directory.
pub const DEFAULT_MODEL_FILE: &str = "demand_forecast.json";

/// Persisted application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Path to the demand model artifact. `None` falls back to the default
    /// location under the app models directory.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

/// Errors that may occur while loading app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to resolve or create the config directory.
    #[error("Failed to prepare config directory: {0}")]
    AppDir(#[from] AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse the settings file.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// Settings file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
}

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    load_settings_from(&path)
}

/// Load settings from an explicit path, returning defaults if it is missing.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the model artifact path.
///
/// Precedence: `DEMANDCAST_MODEL_PATH`, then the settings entry, then
/// `models/demand_forecast.json` under the app root.
pub fn resolve_model_path(settings: &AppSettings) -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Some(path) = &settings.model_path {
        return Ok(path.clone());
    }
    Ok(app_dirs::models_dir()?.join(DEFAULT_MODEL_FILE))
}
