//! Application directory helpers anchored to a single `.demandcast` folder.
//!
//! Config, logs and model artifacts live under the OS config directory
//! (e.g., `%APPDATA%` on Windows) by default, with a `DEMANDCAST_CONFIG_HOME`
//! override for tests or portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".demandcast";

/// Environment variable overriding the base config directory.
pub const CONFIG_HOME_ENV: &str = "DEMANDCAST_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Return the root `.demandcast` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    let path = base.join(APP_DIR_NAME);
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Return the logs directory inside the `.demandcast` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    child_dir("logs")
}

/// Return the models directory inside the `.demandcast` root, creating it if needed.
pub fn models_dir() -> Result<PathBuf, AppDirError> {
    child_dir("models")
}

fn child_dir(name: &str) -> Result<PathBuf, AppDirError> {
    let path = app_root_dir()?.join(name);
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
pub(crate) fn set_config_base_override(path: PathBuf) {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = Some(path);
}

#[cfg(test)]
pub(crate) fn clear_config_base_override() {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn app_dirs_are_created_under_the_override() {
        let base = tempdir().unwrap();
        set_config_base_override(base.path().to_path_buf());
        let root = app_root_dir().unwrap();
        assert!(root.ends_with(APP_DIR_NAME));
        assert!(root.is_dir());
        let models = models_dir().unwrap();
        assert!(models.starts_with(&root));
        assert!(models.is_dir());
        clear_config_base_override();
    }
}
