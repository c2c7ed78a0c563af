//! Tree ensemble inference and label decoding.

mod common;

use common::{constant_tree, stump};
use dengue_risk::model::{ForestRegressor, LabelEncoder, RegressionTree};
use dengue_risk::PipelineError;
use ndarray::array;

fn labels() -> LabelEncoder {
    LabelEncoder::new(vec!["High Risk".into(), "Low Risk".into(), "Minimal to No Risk".into()])
}

#[test]
fn stump_splits_on_threshold_inclusive_left() {
    let t = stump(1, 0.5, 10.0, 20.0);
    let x = array![[0.0, 0.5], [0.0, 0.6], [9.0, -1.0]];
    let out: Vec<f64> = x.rows().into_iter().map(|r| t.predict_row(r)).collect();
    assert_eq!(out, vec![10.0, 20.0, 10.0]);
}

#[test]
fn forest_averages_trees() {
    let f = ForestRegressor::new(
        2,
        vec![constant_tree(1.0), stump(0, 0.0, 0.0, 2.0)],
        vec![0.5, 0.5],
    );
    f.check().unwrap();
    let out = f.predict(&array![[-1.0, 0.0], [1.0, 0.0]]);
    assert_eq!(out.to_vec(), vec![0.5, 1.5]);
}

#[test]
fn deeper_tree_walks_to_leaf() {
    // root: x0 <= 0 ? (x1 <= 5 ? 1 : 2) : 3
    let t = RegressionTree {
        children_left: vec![1, 2, -1, -1, -1],
        children_right: vec![4, 3, -1, -1, -1],
        feature: vec![0, 1, -2, -2, -2],
        threshold: vec![0.0, 5.0, -2.0, -2.0, -2.0],
        value: vec![0.0, 0.0, 1.0, 2.0, 3.0],
    };
    t.check(2).unwrap();
    let x = array![[-1.0, 4.0], [-1.0, 6.0], [1.0, 0.0]];
    let out: Vec<f64> = x.rows().into_iter().map(|r| t.predict_row(r)).collect();
    assert_eq!(out, vec![1.0, 2.0, 3.0]);
}

#[test]
fn check_rejects_malformed_trees() {
    let mut cyclic = stump(0, 0.0, 0.0, 1.0);
    cyclic.children_left[0] = 0;
    assert!(cyclic.check(1).is_err());

    let wide = stump(3, 0.0, 0.0, 1.0);
    assert!(wide.check(2).is_err());

    let mut ragged = stump(0, 0.0, 0.0, 1.0);
    ragged.threshold.pop();
    assert!(ragged.check(1).is_err());

    let empty = ForestRegressor::new(1, Vec::new(), vec![1.0]);
    assert!(empty.check().is_err());
}

#[test]
fn decode_rounds_half_to_even() {
    let l = labels();
    assert_eq!(l.decode_score(0.49).unwrap(), "High Risk");
    assert_eq!(l.decode_score(0.5).unwrap(), "High Risk");
    assert_eq!(l.decode_score(1.5).unwrap(), "Minimal to No Risk");
    assert_eq!(l.decode_score(2.5).unwrap(), "Minimal to No Risk");
    assert_eq!(l.decode_score(-0.4).unwrap(), "High Risk");
}

#[test]
fn decode_out_of_range_is_an_error() {
    let l = labels();
    for score in [-0.6, 2.51, 7.0] {
        let err = l.decode_score(score).unwrap_err();
        assert!(
            matches!(err, PipelineError::Decode { classes: 3, index: Some(_), .. }),
            "score {score}"
        );
    }
    let err = l.decode_score(f64::NAN).unwrap_err();
    assert!(matches!(err, PipelineError::Decode { index: None, .. }));
}

#[test]
fn label_encoder_reads_class_list() {
    let l: LabelEncoder = serde_json::from_str(r#"{"classes":["a","b"]}"#).unwrap();
    assert_eq!(l.len(), 2);
    l.check().unwrap();
    assert!(LabelEncoder::new(Vec::new()).check().is_err());
}
