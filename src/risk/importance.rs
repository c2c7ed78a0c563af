use super::RiskEngine;
use crate::features::FEATURES;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

impl RiskEngine {
    /// Model importances for the 24 schema fields, in schema order. Only
    /// the leading 24 entries of the model's importance vector are used.
    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        FEATURES
            .iter()
            .zip(self.artifacts().model().feature_importances())
            .map(|(spec, &importance)| FeatureImportance {
                feature: spec.name,
                importance,
            })
            .collect()
    }

    /// Same scores, highest first; ties keep schema order.
    pub fn ranked_importances(&self) -> Vec<FeatureImportance> {
        let mut ranked = self.feature_importances();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked
    }
}
