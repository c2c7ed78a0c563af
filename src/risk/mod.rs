//! Risk prediction over the fitted artifact bundle.

mod engine;
mod importance;

pub use engine::{RiskEngine, PREDICTION_COLUMN};
pub use importance::FeatureImportance;
