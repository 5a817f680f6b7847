//! Load-once model handle
//!
//! The oracle is built exactly once at startup and never mutated afterwards.
//! A missing model is a permanent state: every caller keeps a formula
//! fallback and consults [`ModelOracle::available`] or matches on
//! [`InferenceError`].

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{FeatureRow, InferenceError, LoadRegressor, PersistedModel};
use crate::config::ModelConfig;

/// Where the loaded model came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    None,
    Native(PathBuf),
    Legacy { path: PathBuf, migrated: bool },
    InMemory,
}

#[derive(Debug)]
pub struct ModelOracle {
    model: Option<Box<dyn LoadRegressor>>,
    source: ModelSource,
}

impl ModelOracle {
    /// Try the native JSON model, then the legacy blob (migrating it on success)
    pub fn load(cfg: &ModelConfig) -> Self {
        match PersistedModel::read_native(&cfg.json_path) {
            Ok(model) => {
                info!(path = %cfg.json_path.display(), "load model loaded from native format");
                return Self {
                    model: Some(model.into_regressor()),
                    source: ModelSource::Native(cfg.json_path.clone()),
                };
            }
            Err(e) => {
                warn!(path = %cfg.json_path.display(), error = %e, "native model unavailable, trying legacy format");
            }
        }

        match PersistedModel::read_legacy(&cfg.legacy_path) {
            Ok(model) => {
                let migrated = migrate(&model, &cfg.json_path);
                info!(
                    path = %cfg.legacy_path.display(),
                    migrated,
                    "load model loaded from legacy format"
                );
                Self {
                    model: Some(model.into_regressor()),
                    source: ModelSource::Legacy {
                        path: cfg.legacy_path.clone(),
                        migrated,
                    },
                }
            }
            Err(e) => {
                warn!(
                    path = %cfg.legacy_path.display(),
                    error = %e,
                    "no usable load model, forecasts use the physics fallback"
                );
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self {
            model: None,
            source: ModelSource::None,
        }
    }

    pub fn from_model(model: Box<dyn LoadRegressor>) -> Self {
        Self {
            model: Some(model),
            source: ModelSource::InMemory,
        }
    }

    pub fn available(&self) -> bool {
        self.model.is_some()
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    /// Predicted load in MW for one feature row.
    ///
    /// Never panics on bad input; every failure comes back as an
    /// [`InferenceError`] so the caller can fall back to the formula.
    pub fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let model = self.model.as_ref().ok_or(InferenceError::Unavailable)?;

        let metadata = model.metadata();
        if !metadata.matches_schema() {
            return Err(InferenceError::SchemaMismatch {
                expected: metadata.feature_names.clone(),
                got: FeatureRow::COLUMNS.iter().map(|c| c.to_string()).collect(),
            });
        }

        let value = model.predict_row(&row.to_vec())?;
        if !value.is_finite() || value < 0.0 {
            return Err(InferenceError::InvalidOutput(value));
        }
        Ok(value)
    }

    /// [`predict`](Self::predict), logging failures and mapping them to `None`.
    ///
    /// An unavailable oracle returns `None` without attempting inference.
    pub fn predict_or_log(&self, row: &FeatureRow, context: &str) -> Option<f64> {
        if !self.available() {
            return None;
        }
        match self.predict(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(context, error = %e, "model inference failed, using formula fallback");
                None
            }
        }
    }
}

/// Best-effort rewrite of a legacy model into the native format.
fn migrate(model: &PersistedModel, json_path: &Path) -> bool {
    match model.write_native(json_path) {
        Ok(()) => {
            info!(path = %json_path.display(), "migrated legacy model to native format");
            true
        }
        Err(e) => {
            warn!(path = %json_path.display(), error = %e, "legacy model migration failed");
            false
        }
    }
}
