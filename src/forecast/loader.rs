//! Process-wide load-once cache for the model artifact.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use thiserror::Error;
use tracing::info;

use super::model::DemandModel;

/// Errors raised while loading the model artifact.
///
/// A failed load is never retried automatically: the artifact is static, so
/// the path or environment must be fixed and the application restarted.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    /// The artifact path does not exist or cannot be read.
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        /// Artifact path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The artifact is not valid JSON.
    #[error("Model artifact {path} is corrupt: {source}")]
    Parse {
        /// Artifact path.
        path: PathBuf,
        /// JSON parse error.
        source: serde_json::Error,
    },
    /// The artifact deserialized but failed structural validation.
    #[error("Model artifact {path} is incompatible: {reason}")]
    Incompatible {
        /// Artifact path.
        path: PathBuf,
        /// Validation failure detail.
        reason: String,
    },
}

/// Load-once cache handing out a shared handle to one deserialized model.
///
/// The first successful [`ModelCache::get_or_load`] reads the artifact from
/// disk; every later call returns the identical `Arc` without touching the
/// filesystem. A failed load leaves the cache empty.
#[derive(Debug)]
pub struct ModelCache {
    slot: OnceLock<Arc<DemandModel>>,
    load_lock: Mutex<()>,
}

impl ModelCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Return the cached handle, loading the artifact on first use.
    ///
    /// Reads after initialization are lock-free; the initial load is
    /// serialized so racing callers read the file at most once.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<DemandModel>, ArtifactLoadError> {
        if let Some(model) = self.slot.get() {
            return Ok(Arc::clone(model));
        }
        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        if let Some(model) = self.slot.get() {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(load_model(path)?);
        info!(path = %path.display(), "Demand model loaded");
        let _ = self.slot.set(Arc::clone(&model));
        Ok(model)
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED_CACHE: ModelCache = ModelCache::new();

/// Fetch the process-wide model handle, loading it on first use.
pub fn shared_model(path: &Path) -> Result<Arc<DemandModel>, ArtifactLoadError> {
    SHARED_CACHE.get_or_load(path)
}

fn load_model(path: &Path) -> Result<DemandModel, ArtifactLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model: DemandModel =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    model
        .validate()
        .map_err(|reason| ArtifactLoadError::Incompatible {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::input::{FEATURE_COUNT, FEATURE_NAMES};
    use tempfile::tempdir;

    fn demo_model() -> DemandModel {
        DemandModel {
            model_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            feature_mean: vec![0.0; FEATURE_COUNT],
            feature_std: vec![1.0; FEATURE_COUNT],
            hidden_size: 1,
            weights1: vec![1.0, 0.0, 0.0, 0.0, 0.0],
            bias1: vec![0.0],
            weights2: vec![1.0, 1.0],
            bias2: vec![0.0, 0.0],
        }
    }

    fn write_artifact(path: &Path, model: &DemandModel) {
        std::fs::write(path, serde_json::to_vec(model).unwrap()).unwrap();
    }

    #[test]
    fn second_call_returns_the_same_handle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_artifact(&path, &demo_model());

        let cache = ModelCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn artifact_is_read_from_disk_only_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_artifact(&path, &demo_model());

        let cache = ModelCache::new();
        let first = cache.get_or_load(&path).unwrap();
        // With the file gone, a second call can only succeed from the cache.
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_artifact_fails_without_poisoning_the_cache() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let path = dir.path().join("model.json");
        write_artifact(&path, &demo_model());

        let cache = ModelCache::new();
        let err = cache.get_or_load(&missing).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Read { .. }));
        // The failed load left no partial state behind.
        assert!(cache.get_or_load(&path).is_ok());
    }

    #[test]
    fn corrupt_artifact_fails_to_parse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = ModelCache::new().get_or_load(&path).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Parse { .. }));
    }

    #[test]
    fn incompatible_artifact_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut model = demo_model();
        model.feature_names.swap(0, 1);
        write_artifact(&path, &model);

        let err = ModelCache::new().get_or_load(&path).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Incompatible { .. }));
    }
}
