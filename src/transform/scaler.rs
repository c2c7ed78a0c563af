use super::{check_finite, check_width, Stage};
use crate::error::Result;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Absent when fit without centering
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// Absent when fit without scaling
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean: Some(mean),
            scale: Some(scale),
        }
    }

    /// Width implied by the parameters; `None` when neither is present.
    pub fn width(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.scale.as_ref().map(Vec::len))
    }

    /// Parameter vectors agree in length and every value is usable.
    pub fn check(&self, expected: usize) -> std::result::Result<(), String> {
        for (label, params) in [("mean", &self.mean), ("scale", &self.scale)] {
            if let Some(p) = params {
                if p.len() != expected {
                    return Err(format!("{} has {} entries, expected {}", label, p.len(), expected));
                }
                if p.iter().any(|v| !v.is_finite()) {
                    return Err(format!("{} contains non-finite values", label));
                }
            }
        }
        Ok(())
    }
}

impl Stage for StandardScaler {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        check_width(self, x)?;
        let mut out = x.clone();
        if let Some(mean) = &self.mean {
            out -= &Array1::from_vec(mean.clone()).insert_axis(Axis(0));
        }
        if let Some(scale) = &self.scale {
            // zero variance at fit time means "leave unscaled"
            let scale = Array1::from_iter(scale.iter().map(|&s| if s == 0.0 { 1.0 } else { s }));
            out /= &scale.insert_axis(Axis(0));
        }
        check_finite(self, &out)?;
        Ok(out)
    }

    fn n_features_in(&self) -> usize {
        self.width().unwrap_or(0)
    }

    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }

    fn name(&self) -> &'static str {
        "scaler"
    }
}
