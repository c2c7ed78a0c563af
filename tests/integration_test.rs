//! Integration test: config load, artifact loading and failure reporting, end-to-end prediction.

mod common;

use dengue_risk::{
    artifacts::ArtifactLoader,
    config::{AppConfig, ArtifactsConfig},
    error::FaultReason,
    FeatureVector, PipelineError, RiskEngine,
};
use std::path::Path;
use std::sync::Arc;

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.artifacts.model, "model_rf.json");
    assert_eq!(c.reference.bins, 20);
    assert_eq!(c.reference.key_features, vec!["temp", "humidity", "precip", "cases"]);
    assert_eq!(c.log.level, "info");
}

#[test]
fn config_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"artifacts":{"dir":"/srv/models"},"log":{"json":true}}"#).unwrap();
    let c = AppConfig::load(&path);
    assert_eq!(c.artifacts.dir, Path::new("/srv/models"));
    assert_eq!(c.artifacts.scaler, "standard_scaler.json");
    assert!(c.log.json);
    assert_eq!(c.log.level, "info");
}

#[test]
fn config_malformed_file_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let c = AppConfig::load(&path);
    assert_eq!(c.artifacts.dir, Path::new("."));
}

#[test]
fn load_from_files_and_predict() {
    let dir = tempfile::tempdir().unwrap();
    common::write_artifacts(dir.path());
    let artifacts = ArtifactLoader::new(ArtifactsConfig::in_dir(dir.path())).load().unwrap();

    assert_eq!(artifacts.fingerprints().len(), 5);
    assert!(artifacts.fingerprints().iter().all(|f| f.sha256.len() == 64));

    let engine = RiskEngine::new(Arc::new(artifacts));
    assert_eq!(engine.predict(&FeatureVector::midpoints()).unwrap(), common::LABELS[0]);
    assert_eq!(engine.predict(&FeatureVector::maximums()).unwrap(), common::LABELS[2]);
}

#[test]
fn missing_files_are_all_named() {
    let dir = tempfile::tempdir().unwrap();
    common::write_artifacts(dir.path());
    std::fs::remove_file(dir.path().join("model_rf.json")).unwrap();
    std::fs::remove_file(dir.path().join("label_encoder.json")).unwrap();

    let err = ArtifactLoader::new(ArtifactsConfig::in_dir(dir.path())).load().unwrap_err();
    let PipelineError::MissingArtifact { faults } = &err else {
        panic!("expected MissingArtifact, got {err:?}");
    };
    assert_eq!(faults.len(), 2);
    assert!(faults.iter().all(|f| f.reason == FaultReason::NotFound));
    assert_eq!(err.faulty_files(), vec!["model_rf.json", "label_encoder.json"]);

    let msg = err.to_string();
    assert!(msg.contains("model_rf.json"));
    assert!(msg.contains("label_encoder.json"));
    assert!(err.user_message().contains("model_rf.json"));
}

#[test]
fn empty_directory_names_all_five_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArtifactLoader::new(ArtifactsConfig::in_dir(dir.path())).load().unwrap_err();
    assert_eq!(err.faulty_files().len(), 5);
}

#[test]
fn malformed_artifact_is_missing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    common::write_artifacts(dir.path());
    std::fs::write(dir.path().join("power_transformer.json"), b"\x80\x03pickle").unwrap();

    let err = ArtifactLoader::new(ArtifactsConfig::in_dir(dir.path())).load().unwrap_err();
    let PipelineError::MissingArtifact { faults } = err else {
        panic!("expected MissingArtifact");
    };
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].file, "power_transformer.json");
    assert!(matches!(faults[0].reason, FaultReason::Malformed(_)));
}

#[test]
fn inconsistent_artifacts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    common::write_artifacts(dir.path());
    // degree-3 expansion no longer matches the model's input width
    let poly = dengue_risk::transform::PolynomialFeatures::new(24, 3, false, true);
    std::fs::write(
        dir.path().join("polynomial_features.json"),
        serde_json::to_string(&poly).unwrap(),
    )
    .unwrap();

    let err = ArtifactLoader::new(ArtifactsConfig::in_dir(dir.path())).load().unwrap_err();
    let PipelineError::MissingArtifact { faults } = err else {
        panic!("expected MissingArtifact");
    };
    assert_eq!(faults[0].file, "model_rf.json");
    assert!(matches!(faults[0].reason, FaultReason::Inconsistent(_)));
}

#[test]
fn scaler_width_must_match_schema() {
    let bad = dengue_risk::transform::StandardScaler::new(vec![0.0; 23], vec![1.0; 23]);
    let err = dengue_risk::FittedArtifacts::new(
        bad,
        common::power(),
        common::poly(),
        common::model(),
        common::labels(),
    )
    .unwrap_err();
    assert_eq!(err.faulty_files(), vec!["scaler"]);
}

#[test]
fn duplicate_labels_are_rejected() {
    let labels = dengue_risk::model::LabelEncoder::new(vec!["Low Risk".into(), "Low Risk".into()]);
    let err = dengue_risk::FittedArtifacts::new(
        common::scaler(),
        common::power(),
        common::poly(),
        common::model(),
        labels,
    )
    .unwrap_err();
    assert_eq!(err.faulty_files(), vec!["label_encoder"]);
}
