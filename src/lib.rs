//! Dengue risk prediction from weather and case-count features.
//!
//! Modular structure:
//! - [`features`] — Fixed 24-field schema, feature vectors, CSV tables
//! - [`transform`] — Fitted scaler, power transform, polynomial expansion
//! - [`model`] — Tree-ensemble regressor and label decoding
//! - [`artifacts`] — Load-once bundle of the five fitted artifacts
//! - [`risk`] — Single and batch risk prediction, feature importance
//! - [`session`] — Per-session prediction history
//! - [`export`] — Template, batch and history downloads
//! - [`reference`] — Best-effort reference dataset insights
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod features;
pub mod transform;
pub mod model;
pub mod artifacts;
pub mod risk;
pub mod session;
pub mod export;
pub mod reference;
pub mod logging;

pub use config::AppConfig;
pub use error::{PipelineError, Result};
pub use features::{FeatureVector, Table, FEATURES};
pub use artifacts::{FittedArtifacts, ArtifactLoader};
pub use risk::RiskEngine;
pub use session::{Session, PredictionRecord};
pub use logging::StructuredLogger;
