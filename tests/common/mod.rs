//! Hand-built artifacts: every field is standardized onto [-1, 1] over its
//! advisory range, the power transform is the identity, and two stumps on
//! the `tempmax` and `cases` terms vote for class 0 or 2.
#![allow(dead_code)]

use dengue_risk::features::FEATURES;
use dengue_risk::model::{ForestRegressor, LabelEncoder, RegressionTree, LEAF};
use dengue_risk::transform::{PolynomialFeatures, PowerTransformer, StandardScaler};
use dengue_risk::{FeatureVector, FittedArtifacts, RiskEngine};
use std::path::Path;
use std::sync::Arc;

pub const LABELS: [&str; 3] = ["Minimal to No Risk", "Low Risk", "Moderate Risk"];

/// Expanded column of the linear `tempmax` term (after the bias column)
pub const TEMPMAX_TERM: usize = 1;
/// Expanded column of the linear `cases` term
pub const CASES_TERM: usize = 24;
/// 1 bias + 24 linear + 300 quadratic
pub const EXPANDED: usize = 325;

/// Single-leaf tree with a constant output
pub fn constant_tree(value: f64) -> RegressionTree {
    RegressionTree {
        children_left: vec![LEAF],
        children_right: vec![LEAF],
        feature: vec![-2],
        threshold: vec![-2.0],
        value: vec![value],
    }
}

/// Root split into two leaves
pub fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> RegressionTree {
    RegressionTree {
        children_left: vec![1, LEAF, LEAF],
        children_right: vec![2, LEAF, LEAF],
        feature: vec![feature as i64, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![0.0, left, right],
    }
}

pub fn scaler() -> StandardScaler {
    StandardScaler::new(
        FEATURES.iter().map(|f| f.midpoint()).collect(),
        FEATURES.iter().map(|f| (f.max - f.min) / 2.0).collect(),
    )
}

pub fn power() -> PowerTransformer {
    PowerTransformer::yeo_johnson(vec![1.0; 24])
}

pub fn poly() -> PolynomialFeatures {
    PolynomialFeatures::new(24, 2, false, true)
}

pub fn importances() -> Vec<f64> {
    let mut v = vec![0.0; EXPANDED];
    v[0] = 0.1;
    v[5] = 0.4;
    v[23] = 0.3;
    v[CASES_TERM] = 0.2;
    v
}

pub fn model() -> ForestRegressor {
    ForestRegressor::new(
        EXPANDED,
        vec![
            stump(TEMPMAX_TERM, 0.5, 0.0, 2.0),
            stump(CASES_TERM, 0.5, 0.0, 2.0),
        ],
        importances(),
    )
}

pub fn constant_model(value: f64) -> ForestRegressor {
    ForestRegressor::new(EXPANDED, vec![constant_tree(value)], importances())
}

pub fn labels() -> LabelEncoder {
    LabelEncoder::new(LABELS.iter().map(|s| s.to_string()).collect())
}

pub fn artifacts_with_model(model: ForestRegressor) -> FittedArtifacts {
    FittedArtifacts::new(scaler(), power(), poly(), model, labels()).expect("fixture artifacts are consistent")
}

pub fn artifacts() -> FittedArtifacts {
    artifacts_with_model(model())
}

pub fn engine() -> RiskEngine {
    RiskEngine::new(Arc::new(artifacts()))
}

pub fn engine_with_model(model: ForestRegressor) -> RiskEngine {
    RiskEngine::new(Arc::new(artifacts_with_model(model)))
}

/// Write the fixture under the default artifact file names.
pub fn write_artifacts(dir: &Path) {
    let write = |name: &str, json: String| std::fs::write(dir.join(name), json).unwrap();
    write("standard_scaler.json", serde_json::to_string(&scaler()).unwrap());
    write("power_transformer.json", serde_json::to_string(&power()).unwrap());
    write("polynomial_features.json", serde_json::to_string(&poly()).unwrap());
    write("model_rf.json", serde_json::to_string(&model()).unwrap());
    write("label_encoder.json", serde_json::to_string(&labels()).unwrap());
}

pub fn fields_csv_header() -> String {
    FEATURES.iter().map(|f| f.name).collect::<Vec<_>>().join(",")
}

pub fn csv_row(fv: &FeatureVector) -> String {
    fv.values().iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}
