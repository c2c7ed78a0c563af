//! Inference benchmark: one record through the full stage chain.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dengue_risk::features::FEATURES;
use dengue_risk::model::{ForestRegressor, LabelEncoder, RegressionTree, LEAF};
use dengue_risk::transform::{PolynomialFeatures, PowerTransformer, StandardScaler};
use dengue_risk::{FeatureVector, FittedArtifacts, RiskEngine};
use std::sync::Arc;

/// Root split into two leaves
fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> RegressionTree {
    RegressionTree {
        children_left: vec![1, LEAF, LEAF],
        children_right: vec![2, LEAF, LEAF],
        feature: vec![feature as i64, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![0.0, left, right],
    }
}

fn engine(trees: usize) -> RiskEngine {
    let scaler = StandardScaler::new(
        FEATURES.iter().map(|f| f.midpoint()).collect(),
        FEATURES.iter().map(|f| (f.max - f.min) / 2.0).collect(),
    );
    let power = PowerTransformer::yeo_johnson(vec![0.8; 24]);
    let poly = PolynomialFeatures::new(24, 2, false, true);
    let width = poly.params().n_features_in;
    let expanded = 1 + width + width * (width + 1) / 2;
    let forest = ForestRegressor::new(
        expanded,
        (0..trees)
            .map(|i| stump(i % expanded, 0.0, 0.0, 1.0))
            .collect(),
        vec![1.0 / expanded as f64; expanded],
    );
    let labels = LabelEncoder::new(vec!["Minimal to No Risk".into(), "Low Risk".into()]);
    let artifacts = FittedArtifacts::new(scaler, power, poly, forest, labels).unwrap();
    RiskEngine::new(Arc::new(artifacts))
}

fn bench_single_prediction(c: &mut Criterion) {
    let engine = engine(100);
    let fv = FeatureVector::midpoints();

    c.bench_function("predict_single_100_trees", |b| {
        b.iter(|| engine.predict(black_box(&fv)).unwrap())
    });
}

fn bench_prediction_by_forest_size(c: &mut Criterion) {
    let fv = FeatureVector::maximums();

    let mut g = c.benchmark_group("predict_by_trees");
    for trees in [10, 100, 500] {
        let engine = engine(trees);
        g.bench_function(format!("trees_{}", trees).as_str(), |b| {
            b.iter(|| engine.predict(black_box(&fv)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_single_prediction, bench_prediction_by_forest_size);
criterion_main!(benches);
