//! The five fitted artifacts, loaded together as one immutable bundle.

mod loader;

pub use loader::{load_once, ArtifactLoader, Fingerprint};

use crate::error::{ArtifactFault, FaultReason, PipelineError, Result};
use crate::features::FEATURE_COUNT;
use crate::model::{ForestRegressor, LabelEncoder};
use crate::transform::{PolynomialFeatures, PowerTransformer, Stage, StandardScaler};

/// Artifact bundle. Never mutated after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FittedArtifacts {
    scaler: StandardScaler,
    power: PowerTransformer,
    poly: PolynomialFeatures,
    model: ForestRegressor,
    labels: LabelEncoder,
    fingerprints: Vec<Fingerprint>,
}

/// File names used in fault reports for in-memory bundles
const SCALER: &str = "scaler";
const POWER: &str = "power_transformer";
const POLY: &str = "polynomial_features";
const MODEL: &str = "model";
const LABELS: &str = "label_encoder";

impl FittedArtifacts {
    /// Assemble a bundle from already-decoded parts, checking that their
    /// shapes chain: 24 → 24 → 24 → M → score, with at least one class.
    pub fn new(
        scaler: StandardScaler,
        power: PowerTransformer,
        poly: PolynomialFeatures,
        model: ForestRegressor,
        labels: LabelEncoder,
    ) -> Result<Self> {
        let names = [SCALER, POWER, POLY, MODEL, LABELS].map(str::to_string);
        Self::with_names(scaler, power, poly, model, labels, names)
    }

    pub(crate) fn with_names(
        scaler: StandardScaler,
        power: PowerTransformer,
        poly: PolynomialFeatures,
        model: ForestRegressor,
        labels: LabelEncoder,
        names: [String; 5],
    ) -> Result<Self> {
        let [scaler_name, power_name, poly_name, model_name, labels_name] = names;
        let mut faults = Vec::new();
        let mut fault = |file: &str, detail: String| {
            faults.push(ArtifactFault {
                file: file.to_string(),
                reason: FaultReason::Inconsistent(detail),
            })
        };

        match scaler.width() {
            None => fault(&scaler_name, "scaler has neither mean nor scale".to_string()),
            Some(_) => {
                if let Err(e) = scaler.check(FEATURE_COUNT) {
                    fault(&scaler_name, e);
                }
            }
        }
        if let Err(e) = power.check(FEATURE_COUNT) {
            fault(&power_name, e);
        }
        if poly.n_features_in() != FEATURE_COUNT {
            fault(
                &poly_name,
                format!("expects {} inputs, schema has {}", poly.n_features_in(), FEATURE_COUNT),
            );
        }
        if let Err(e) = model.check() {
            fault(&model_name, e);
        }
        if model.n_features_in != poly.n_features_out() {
            fault(
                &model_name,
                format!(
                    "expects {} inputs, polynomial expansion yields {}",
                    model.n_features_in,
                    poly.n_features_out()
                ),
            );
        }
        if model.feature_importances.len() < FEATURE_COUNT {
            fault(
                &model_name,
                format!(
                    "{} feature importances, need at least {}",
                    model.feature_importances.len(),
                    FEATURE_COUNT
                ),
            );
        }
        if let Err(e) = labels.check() {
            fault(&labels_name, e);
        }

        if !faults.is_empty() {
            return Err(PipelineError::MissingArtifact { faults });
        }
        Ok(Self {
            scaler,
            power,
            poly,
            model,
            labels,
            fingerprints: Vec::new(),
        })
    }

    pub(crate) fn with_fingerprints(mut self, fingerprints: Vec<Fingerprint>) -> Self {
        self.fingerprints = fingerprints;
        self
    }

    /// Transform stages in application order
    pub fn stages(&self) -> [&dyn Stage; 3] {
        [&self.scaler as &dyn Stage, &self.power, &self.poly]
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn power_transformer(&self) -> &PowerTransformer {
        &self.power
    }

    pub fn polynomial(&self) -> &PolynomialFeatures {
        &self.poly
    }

    pub fn model(&self) -> &ForestRegressor {
        &self.model
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    /// SHA-256 of each artifact file; empty for in-memory bundles
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }
}
