//! On-disk model formats
//!
//! The native format is a self-describing JSON document. Older exports were
//! bincode blobs; those still load and are rewritten as JSON once.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{LinearLoadModel, LoadRegressor};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed legacy model: {0}")]
    Legacy(#[from] bincode::Error),
}

/// Every model kind this service knows how to evaluate
#[derive(Debug, Serialize, Deserialize)]
pub enum PersistedModel {
    Linear(LinearLoadModel),
    #[cfg(feature = "ml")]
    RandomForest(super::smartcore::RandomForestLoadModel),
}

impl PersistedModel {
    pub fn into_regressor(self) -> Box<dyn LoadRegressor> {
        match self {
            Self::Linear(m) => Box::new(m),
            #[cfg(feature = "ml")]
            Self::RandomForest(m) => Box::new(m),
        }
    }

    pub fn read_native(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn read_legacy(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = read(path)?;
        Ok(bincode::deserialize(&bytes)?)
    }

    pub fn write_native(&self, path: &Path) -> Result<(), ModelLoadError> {
        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write_legacy(&self, path: &Path) -> Result<(), ModelLoadError> {
        let bytes = bincode::serialize(self)?;
        std::fs::write(path, bytes).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ModelLoadError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ModelLoadError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = PersistedModel::read_native(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound(_)));
    }

    #[test]
    fn test_native_and_legacy_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("model.json");
        let bin = dir.path().join("model.bin");

        let model = PersistedModel::Linear(LinearLoadModel::passthrough());
        model.write_native(&json).unwrap();
        model.write_legacy(&bin).unwrap();

        for loaded in [
            PersistedModel::read_native(&json).unwrap(),
            PersistedModel::read_legacy(&bin).unwrap(),
        ] {
            match loaded {
                PersistedModel::Linear(m) => assert_eq!(m, LinearLoadModel::passthrough()),
                #[allow(unreachable_patterns)]
                _ => panic!("unexpected model kind"),
            }
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("model.json");
        std::fs::write(&json, b"{not json").unwrap();
        assert!(matches!(
            PersistedModel::read_native(&json),
            Err(ModelLoadError::Json(_))
        ));
    }
}
