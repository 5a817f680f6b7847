//! Linear load model
//!
//! Lightweight regressor persisted as coefficients plus intercept. Useful as a
//! deployable model on its own and as a stand-in for the forest in tests.

use serde::{Deserialize, Serialize};

use super::{FeatureRow, InferenceError, LoadRegressor, ModelMetadata, ModelType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearLoadModel {
    pub metadata: ModelMetadata,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearLoadModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64, metadata: ModelMetadata) -> Self {
        Self {
            metadata,
            coefficients,
            intercept,
        }
    }

    /// Model that echoes the `base_load` column, i.e. predicts the formula baseline
    pub fn passthrough() -> Self {
        let mut coefficients = vec![0.0; FeatureRow::COLUMNS.len()];
        coefficients[FeatureRow::COLUMNS.len() - 1] = 1.0;
        Self::new(
            coefficients,
            0.0,
            ModelMetadata::new("linear_passthrough", ModelType::LinearRegression),
        )
    }
}

impl LoadRegressor for LinearLoadModel {
    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::FeatureMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }

        let prediction: f64 = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum::<f64>()
            + self.intercept;

        Ok(prediction)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
