//! Error taxonomy for artifact loading and prediction.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Why a single artifact file could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultReason {
    NotFound,
    Unreadable(String),
    Malformed(String),
    Inconsistent(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFault {
    pub file: String,
    pub reason: FaultReason,
}

impl fmt::Display for ArtifactFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FaultReason::NotFound => write!(f, "{} (not found)", self.file),
            FaultReason::Unreadable(e) => write!(f, "{} (unreadable: {})", self.file, e),
            FaultReason::Malformed(e) => write!(f, "{} (malformed: {})", self.file, e),
            FaultReason::Inconsistent(e) => write!(f, "{} (inconsistent: {})", self.file, e),
        }
    }
}

fn join_faults(faults: &[ArtifactFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more artifacts absent or unusable; prediction is impossible.
    #[error("missing artifacts: {}", join_faults(.faults))]
    MissingArtifact { faults: Vec<ArtifactFault> },

    /// Input fields/columns missing, unknown, misplaced or non-numeric.
    #[error("schema error: {0}")]
    Schema(String),

    /// Numeric failure inside a transform stage.
    #[error("transform error in {stage}: {detail}")]
    Transform { stage: &'static str, detail: String },

    /// Model score does not round to a known class index.
    /// `index` is `None` when the score is not finite.
    #[error("decode error: score {score} does not round to a class index in 0..{classes}")]
    Decode {
        score: f64,
        index: Option<i64>,
        classes: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn transform(stage: &'static str, detail: impl Into<String>) -> Self {
        PipelineError::Transform {
            stage,
            detail: detail.into(),
        }
    }

    /// Faulty artifact file names, for `MissingArtifact`
    pub fn faulty_files(&self) -> Vec<&str> {
        match self {
            PipelineError::MissingArtifact { faults } => faults.iter().map(|f| f.file.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Message shown to the user at the boundary of an operation.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingArtifact { faults } => format!(
                "Missing model files: {}. Ensure all five artifacts are deployed together.",
                join_faults(faults)
            ),
            PipelineError::Schema(msg) => format!("Invalid input: {}", msg),
            PipelineError::Transform { stage, detail } => {
                format!("Processing error ({}): {}", stage, detail)
            }
            PipelineError::Decode { score, .. } => format!(
                "model score {:.3} does not map to a known risk level",
                score
            ),
            PipelineError::Io(e) => format!("File error: {}", e),
            PipelineError::Csv(e) => format!("File error: {}", e),
        }
    }
}
