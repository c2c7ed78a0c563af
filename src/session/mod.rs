//! Per-user session state: prediction history and the last valid input.
//! Nothing here is shared between sessions or persisted.

use crate::error::Result;
use crate::features::FeatureVector;
use crate::risk::RiskEngine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// One successful single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub input: FeatureVector,
    pub label: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: Vec<PredictionRecord>,
    /// Last single prediction succeeded
    input_valid: bool,
    last_input: Option<FeatureVector>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            history: Vec::new(),
            input_valid: false,
            last_input: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Predict one record and, on success, append it to the history.
    /// A failure leaves the history untouched and clears `input_valid`.
    pub fn predict(&mut self, engine: &RiskEngine, input: FeatureVector) -> Result<String> {
        match engine.predict(&input) {
            Ok(label) => {
                self.record(input, label.clone());
                Ok(label)
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "single prediction failed");
                self.input_valid = false;
                Err(e)
            }
        }
    }

    /// Append a prediction made elsewhere.
    pub fn record(&mut self, input: FeatureVector, label: String) {
        info!(session_id = %self.id, label = %label, entries = self.history.len() + 1, "prediction recorded");
        self.history.push(PredictionRecord {
            input,
            label,
            at: Utc::now(),
        });
        self.input_valid = true;
        self.last_input = Some(input);
    }

    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        info!(session_id = %self.id, cleared = self.history.len(), "history cleared");
        self.history.clear();
    }

    pub fn input_valid(&self) -> bool {
        self.input_valid
    }

    /// Input of the last successful prediction, if still valid
    pub fn last_valid_input(&self) -> Option<&FeatureVector> {
        self.last_input.as_ref().filter(|_| self.input_valid)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
