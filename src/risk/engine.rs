//! Feature vectors → scaler → power transform → polynomial expansion →
//! forest score → rounded class index → risk label.

use crate::artifacts::FittedArtifacts;
use crate::error::{PipelineError, Result};
use crate::features::{FeatureVector, Table, FEATURE_COUNT};
use ndarray::Array2;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Column appended to batch results
pub const PREDICTION_COLUMN: &str = "Predicted_Risk";

/// Stateless predictor over a shared artifact bundle; cheap to clone.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    artifacts: Arc<FittedArtifacts>,
}

impl RiskEngine {
    pub fn new(artifacts: Arc<FittedArtifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &FittedArtifacts {
        &self.artifacts
    }

    /// Run the transform stages and the model over `rows x 24` inputs.
    pub fn scores(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let mut current = x.to_owned();
        for stage in self.artifacts.stages() {
            current = stage.transform(&current)?;
            debug!(stage = stage.name(), width = current.ncols(), "stage applied");
        }
        Ok(self.artifacts.model().predict(&current).to_vec())
    }

    /// Decode every score, failing on the first that has no class.
    fn decode_all(&self, scores: &[f64]) -> Result<Vec<String>> {
        let labels = self.artifacts.labels();
        scores
            .iter()
            .enumerate()
            .map(|(row, &score)| {
                labels.decode_score(score).map(str::to_string).map_err(|e| {
                    warn!(row, score, "model score outside label range");
                    e
                })
            })
            .collect()
    }

    /// Predict one record.
    pub fn predict(&self, record: &FeatureVector) -> Result<String> {
        record.validate()?;
        let x = Array2::from_shape_vec((1, FEATURE_COUNT), record.as_slice().to_vec())
            .map_err(|e| PipelineError::transform("input", e.to_string()))?;
        let score = self.scores(&x)?[0];
        let label = self.artifacts.labels().decode_score(score).map_err(|e| {
            warn!(score, "model score outside label range");
            e
        })?;
        debug!(label, score, "single prediction");
        Ok(label.to_string())
    }

    /// Predict every row of a table in one pass and return the table with
    /// the labels appended as [`PREDICTION_COLUMN`]. All-or-nothing.
    pub fn predict_table(&self, table: Table) -> Result<Table> {
        let x = table.feature_matrix()?;
        let labels = self.predict_matrix(&x)?;
        info!(rows = labels.len(), "batch prediction");
        table.with_column(PREDICTION_COLUMN, labels)
    }

    /// Labels for a raw `rows x 24` matrix in schema order.
    pub fn predict_matrix(&self, x: &Array2<f64>) -> Result<Vec<String>> {
        if x.nrows() == 0 {
            return Ok(Vec::new());
        }
        let scores = self.scores(x)?;
        self.decode_all(&scores)
    }
}
