use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Class index `i` decodes to `classes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn check(&self) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("no classes".to_string());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(format!("duplicate class '{}'", dup));
        }
        Ok(())
    }

    /// Round half to even, then decode. Out-of-range or non-finite scores
    /// are errors, never clamped.
    pub fn decode_score(&self, score: f64) -> Result<&str> {
        if !score.is_finite() {
            return Err(PipelineError::Decode {
                score,
                index: None,
                classes: self.len(),
            });
        }
        let rounded = score.round_ties_even();
        let index = rounded as i64;
        if rounded < 0.0 || index as usize >= self.len() {
            return Err(PipelineError::Decode {
                score,
                index: Some(index),
                classes: self.len(),
            });
        }
        Ok(&self.classes[index as usize])
    }
}
