//! Reads, fingerprints and decodes the artifact files. Every file is
//! attempted so a failure report names all faulty files at once.

use super::FittedArtifacts;
use crate::config::ArtifactsConfig;
use crate::error::{ArtifactFault, FaultReason, PipelineError, Result};
use crate::model::{ForestRegressor, LabelEncoder};
use crate::transform::{PolynomialFeatures, PowerTransformer, StandardScaler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info};

static ARTIFACTS: OnceLock<Arc<FittedArtifacts>> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Load the bundle the first time; later calls return the cached handle
/// without touching the filesystem. A failed load is not cached.
pub fn load_once(config: &ArtifactsConfig) -> Result<Arc<FittedArtifacts>> {
    if let Some(artifacts) = ARTIFACTS.get() {
        return Ok(Arc::clone(artifacts));
    }
    let _guard = INIT.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(artifacts) = ARTIFACTS.get() {
        return Ok(Arc::clone(artifacts));
    }
    let loaded = Arc::new(ArtifactLoader::new(config.clone()).load()?);
    Ok(Arc::clone(ARTIFACTS.get_or_init(|| loaded)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub file: String,
    pub sha256: String,
}

pub struct ArtifactLoader {
    config: ArtifactsConfig,
}

impl ArtifactLoader {
    pub fn new(config: ArtifactsConfig) -> Self {
        Self { config }
    }

    pub fn paths(&self) -> [PathBuf; 5] {
        [
            self.config.scaler_path(),
            self.config.power_transformer_path(),
            self.config.polynomial_path(),
            self.config.model_path(),
            self.config.label_encoder_path(),
        ]
    }

    /// Load all five artifacts, or fail with `MissingArtifact` naming each
    /// file that is absent, unreadable, malformed or inconsistent.
    pub fn load(&self) -> Result<FittedArtifacts> {
        let [scaler_path, power_path, poly_path, model_path, labels_path] = self.paths();
        let mut faults = Vec::new();
        let mut fingerprints = Vec::new();

        let scaler: Option<StandardScaler> = read_artifact(&scaler_path, &mut faults, &mut fingerprints);
        let power: Option<PowerTransformer> = read_artifact(&power_path, &mut faults, &mut fingerprints);
        let poly: Option<PolynomialFeatures> = read_artifact(&poly_path, &mut faults, &mut fingerprints);
        let model: Option<ForestRegressor> = read_artifact(&model_path, &mut faults, &mut fingerprints);
        let labels: Option<LabelEncoder> = read_artifact(&labels_path, &mut faults, &mut fingerprints);

        let (Some(scaler), Some(power), Some(poly), Some(model), Some(labels)) =
            (scaler, power, poly, model, labels)
        else {
            return Err(PipelineError::MissingArtifact { faults });
        };

        let names = [scaler_path, power_path, poly_path, model_path, labels_path].map(|p| display_name(&p));
        let artifacts = FittedArtifacts::with_names(scaler, power, poly, model, labels, names)?
            .with_fingerprints(fingerprints);

        for fp in artifacts.fingerprints() {
            info!(file = %fp.file, sha256 = %fp.sha256, "artifact loaded");
        }
        info!(
            expanded_features = artifacts.model().n_features_in,
            trees = artifacts.model().trees.len(),
            classes = artifacts.labels().len(),
            "artifacts ready"
        );
        Ok(artifacts)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    faults: &mut Vec<ArtifactFault>,
    fingerprints: &mut Vec<Fingerprint>,
) -> Option<T> {
    let file = display_name(path);
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            let reason = if e.kind() == ErrorKind::NotFound {
                FaultReason::NotFound
            } else {
                FaultReason::Unreadable(e.to_string())
            };
            faults.push(ArtifactFault { file, reason });
            return None;
        }
    };
    debug!(path = %path.display(), bytes = bytes.len(), "read artifact");

    let digest = Sha256::digest(&bytes);
    fingerprints.push(Fingerprint {
        file: file.clone(),
        sha256: format!("{:x}", digest),
    });

    match serde_json::from_slice::<T>(&bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            faults.push(ArtifactFault {
                file,
                reason: FaultReason::Malformed(e.to_string()),
            });
            None
        }
    }
}
