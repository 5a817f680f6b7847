//! SmartCore RandomForest load model
//!
//! Persisted forest regressor, the production model when one has been
//! exported by the offline training pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{InferenceError, LoadRegressor, ModelMetadata};

pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

#[derive(Serialize, Deserialize)]
pub struct RandomForestLoadModel {
    pub metadata: ModelMetadata,
    forest: Forest,
}

impl fmt::Debug for RandomForestLoadModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForestLoadModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl RandomForestLoadModel {
    pub fn new(forest: Forest, metadata: ModelMetadata) -> Self {
        Self { metadata, forest }
    }
}

impl LoadRegressor for RandomForestLoadModel {
    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let expected = self.metadata.feature_names.len();
        if features.len() != expected {
            return Err(InferenceError::FeatureMismatch {
                expected,
                got: features.len(),
            });
        }

        // Single row, n features
        let x = DenseMatrix::new(1, features.len(), features.to_vec(), false);

        let predictions = self
            .forest
            .predict(&x)
            .map_err(|e| InferenceError::Backend(format!("{:?}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Backend("model returned empty predictions".to_string()))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ml::{FeatureRow, ModelType};
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;

    /// Small forest fitted on `load = base_load + 2.1 * (temp - 28)`.
    pub(crate) fn fitted_forest() -> RandomForestLoadModel {
        let mut flat = Vec::new();
        let mut y = Vec::new();
        for i in 0..40 {
            let temp = 20.0 + f64::from(i % 20);
            let base_load = 15000.0 + f64::from(i) * 100.0;
            flat.extend_from_slice(&[temp, 68.0, 500.0, 2026.0, 1.0, base_load]);
            y.push(base_load + 2.1 * (temp - 28.0));
        }
        let x = DenseMatrix::new(40, FeatureRow::COLUMNS.len(), flat, false);

        let params = RandomForestRegressorParameters {
            max_depth: Some(6),
            min_samples_leaf: 1,
            min_samples_split: 2,
            n_trees: 8,
            m: None,
            keep_samples: false,
            seed: 42,
        };
        let forest = RandomForestRegressor::fit(&x, &y, params).unwrap();
        RandomForestLoadModel::new(forest, ModelMetadata::new("rf_test", ModelType::RandomForest))
    }

    #[test]
    fn test_forest_predicts_within_training_range() {
        let model = fitted_forest();
        let row = FeatureRow {
            temp: 28.0,
            humidity: 68.0,
            solar: 500.0,
            year: 2026,
            iex_factor: 1.0,
            base_load: 17000.0,
        };
        let pred = model.predict_row(&row.to_vec()).unwrap();
        assert!(pred > 15000.0 && pred < 19000.0, "prediction {pred}");
    }

    #[test]
    fn test_forest_rejects_short_rows() {
        let model = fitted_forest();
        assert!(matches!(
            model.predict_row(&[1.0, 2.0, 3.0]),
            Err(InferenceError::FeatureMismatch { expected: 6, got: 3 })
        ));
    }
}
