use super::{check_finite, check_width, Stage};
use crate::error::{PipelineError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Lambdas closer than this to a special value use the limiting form.
const LAMBDA_EPS: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerMethod {
    YeoJohnson,
    /// Strictly positive inputs only
    BoxCox,
}

/// Per-feature power transform with learned lambdas, optionally followed by
/// standardization of the transformed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTransformer {
    pub method: PowerMethod,
    pub lambdas: Vec<f64>,
    #[serde(default)]
    pub standardize: bool,
    /// Post-transform centering, used when `standardize`
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl PowerTransformer {
    pub fn yeo_johnson(lambdas: Vec<f64>) -> Self {
        Self {
            method: PowerMethod::YeoJohnson,
            lambdas,
            standardize: false,
            mean: None,
            scale: None,
        }
    }

    pub fn with_standardization(mut self, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        self.standardize = true;
        self.mean = Some(mean);
        self.scale = Some(scale);
        self
    }

    pub fn check(&self, expected: usize) -> std::result::Result<(), String> {
        if self.lambdas.len() != expected {
            return Err(format!("lambdas has {} entries, expected {}", self.lambdas.len(), expected));
        }
        if self.lambdas.iter().any(|l| !l.is_finite()) {
            return Err("lambdas contain non-finite values".to_string());
        }
        if self.standardize {
            for (label, params) in [("mean", &self.mean), ("scale", &self.scale)] {
                match params {
                    Some(p) if p.len() == expected => {}
                    Some(p) => {
                        return Err(format!("{} has {} entries, expected {}", label, p.len(), expected))
                    }
                    None => return Err(format!("standardize is set but {} is absent", label)),
                }
            }
        }
        Ok(())
    }

    fn apply_one(&self, x: f64, lambda: f64) -> std::result::Result<f64, String> {
        match self.method {
            PowerMethod::YeoJohnson => Ok(yeo_johnson(x, lambda)),
            PowerMethod::BoxCox => {
                if x <= 0.0 {
                    return Err(format!("box-cox requires strictly positive input, got {}", x));
                }
                Ok(box_cox(x, lambda))
            }
        }
    }
}

fn yeo_johnson(x: f64, lambda: f64) -> f64 {
    if x >= 0.0 {
        if lambda.abs() < LAMBDA_EPS {
            x.ln_1p()
        } else {
            ((x + 1.0).powf(lambda) - 1.0) / lambda
        }
    } else if (lambda - 2.0).abs() < LAMBDA_EPS {
        -(-x).ln_1p()
    } else {
        -((1.0 - x).powf(2.0 - lambda) - 1.0) / (2.0 - lambda)
    }
}

fn box_cox(x: f64, lambda: f64) -> f64 {
    if lambda.abs() < LAMBDA_EPS {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

impl Stage for PowerTransformer {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        check_width(self, x)?;
        let mut out = x.clone();
        for ((r, c), v) in out.indexed_iter_mut() {
            *v = self
                .apply_one(*v, self.lambdas[c])
                .map_err(|e| PipelineError::transform(self.name(), format!("row {} feature {}: {}", r + 1, c, e)))?;
        }
        if self.standardize {
            if let (Some(mean), Some(scale)) = (&self.mean, &self.scale) {
                for mut row in out.rows_mut() {
                    for ((v, m), s) in row.iter_mut().zip(mean).zip(scale) {
                        let s = if *s == 0.0 { 1.0 } else { *s };
                        *v = (*v - m) / s;
                    }
                }
            }
        }
        check_finite(self, &out)?;
        Ok(out)
    }

    fn n_features_in(&self) -> usize {
        self.lambdas.len()
    }

    fn n_features_out(&self) -> usize {
        self.lambdas.len()
    }

    fn name(&self) -> &'static str {
        "power_transformer"
    }
}
