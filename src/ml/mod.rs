//! Machine Learning Module
//!
//! Wraps the pre-trained long-term load regressor:
//! - Feature row layout shared with the offline training pipeline
//! - Persisted model formats (native JSON, legacy bincode)
//! - [`ModelOracle`], the load-once handle every forecast consults
//!
//! Training happens offline; this crate only loads and evaluates models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

pub mod models;
pub mod oracle;
pub mod persistence;

#[cfg(feature = "ml")]
pub mod smartcore;

pub use models::LinearLoadModel;
pub use oracle::{ModelOracle, ModelSource};
pub use persistence::{ModelLoadError, PersistedModel};

/// ML Model Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelType {
    LinearRegression,
    RandomForest,
}

/// ML Model Metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub model_id: String,
    pub model_type: ModelType,
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    /// Column order the model was fitted on
    pub feature_names: Vec<String>,
}

impl ModelMetadata {
    pub fn new(model_id: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            model_id: model_id.into(),
            model_type,
            version: "1.0.0".to_string(),
            trained_at: None,
            feature_names: FeatureRow::COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Whether the model was fitted on exactly the [`FeatureRow`] layout
    pub fn matches_schema(&self) -> bool {
        self.feature_names.len() == FeatureRow::COLUMNS.len()
            && self
                .feature_names
                .iter()
                .zip(FeatureRow::COLUMNS)
                .all(|(name, col)| name == col)
    }
}

/// One model input, in training column order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub temp: f64,
    pub humidity: f64,
    pub solar: f64,
    pub year: i32,
    pub iex_factor: f64,
    /// Base load in MW
    pub base_load: f64,
}

impl FeatureRow {
    pub const COLUMNS: [&'static str; 6] =
        ["temp", "humidity", "solar", "year", "iex_factor", "base_load"];

    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.temp,
            self.humidity,
            self.solar,
            f64::from(self.year),
            self.iex_factor,
            self.base_load,
        ]
    }
}

/// Why a single inference did not produce a usable load value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InferenceError {
    #[error("no model loaded")]
    Unavailable,

    #[error("feature schema mismatch: model expects {expected:?}, got {got:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("feature count mismatch: expected {expected}, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("invalid prediction: {0}")]
    InvalidOutput(f64),

    #[error("model backend error: {0}")]
    Backend(String),
}

/// A fitted regressor mapping a feature vector to load in MW
pub trait LoadRegressor: Send + Sync + Debug {
    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError>;

    fn metadata(&self) -> &ModelMetadata;

    fn model_type(&self) -> ModelType {
        self.metadata().model_type
    }
}
