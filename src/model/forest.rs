//! Tree-ensemble regression inference. Input: `[rows, n_features_in]` f64,
//! output: one score per row (mean of the tree outputs).

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Marks a leaf in `children_left` / `children_right`.
pub const LEAF: i64 = -1;

/// Flat binary tree. Node `i` splits on `feature[i] <= threshold[i]` (go
/// left) unless `children_left[i] == LEAF`, in which case `value[i]` is
/// the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Structural check: arrays agree, children are in range and point
    /// forward (no cycles), split features are below `n_features`.
    pub fn check(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF {
                if !self.value[i].is_finite() {
                    return Err(format!("leaf {} has non-finite value", i));
                }
                continue;
            }
            for child in [l, r] {
                if child <= i as i64 || child as usize >= n {
                    return Err(format!("node {} has invalid child {}", i, child));
                }
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {} splits on feature {} of {}", i, f, n_features));
            }
        }
        Ok(())
    }

    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            // split thresholds were learned on single-precision inputs
            let x = row[self.feature[node] as usize] as f32 as f64;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    pub n_features_in: usize,
    pub trees: Vec<RegressionTree>,
    /// One per input column, normalized at fit time
    pub feature_importances: Vec<f64>,
}

impl ForestRegressor {
    pub fn new(n_features_in: usize, trees: Vec<RegressionTree>, feature_importances: Vec<f64>) -> Self {
        Self {
            n_features_in,
            trees,
            feature_importances,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features_in).map_err(|e| format!("tree {}: {}", i, e))?;
        }
        if self.feature_importances.iter().any(|v| !v.is_finite()) {
            return Err("feature importances contain non-finite values".to_string());
        }
        Ok(())
    }

    /// Caller guarantees `x.ncols() == n_features_in` and a checked forest.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        let n = self.trees.len() as f64;
        x.rows()
            .into_iter()
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n)
            .collect()
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}
