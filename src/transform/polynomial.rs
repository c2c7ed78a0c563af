use super::{check_finite, check_width, Stage};
use crate::error::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Polynomial and interaction terms up to `degree`.
///
/// Output column order: bias (if any), then all degree-1 terms, then
/// degree-2 terms, and so on. Within a degree, terms are the index
/// combinations (with replacement unless `interaction_only`) in
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PolynomialParams", into = "PolynomialParams")]
pub struct PolynomialFeatures {
    params: PolynomialParams,
    /// Feature indices multiplied together for each output column
    terms: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialParams {
    pub n_features_in: usize,
    pub degree: usize,
    #[serde(default)]
    pub interaction_only: bool,
    #[serde(default = "default_include_bias")]
    pub include_bias: bool,
}

fn default_include_bias() -> bool {
    true
}

impl From<PolynomialParams> for PolynomialFeatures {
    fn from(params: PolynomialParams) -> Self {
        let mut terms = Vec::new();
        if params.include_bias {
            terms.push(Vec::new());
        }
        for d in 1..=params.degree {
            let mut combo = Vec::with_capacity(d);
            push_combinations(params.n_features_in, d, 0, params.interaction_only, &mut combo, &mut terms);
        }
        Self { params, terms }
    }
}

impl From<PolynomialFeatures> for PolynomialParams {
    fn from(p: PolynomialFeatures) -> Self {
        p.params
    }
}

fn push_combinations(
    n: usize,
    remaining: usize,
    start: usize,
    interaction_only: bool,
    combo: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if remaining == 0 {
        out.push(combo.clone());
        return;
    }
    for i in start..n {
        combo.push(i);
        let next = if interaction_only { i + 1 } else { i };
        push_combinations(n, remaining - 1, next, interaction_only, combo, out);
        combo.pop();
    }
}

impl PolynomialFeatures {
    pub fn new(n_features_in: usize, degree: usize, interaction_only: bool, include_bias: bool) -> Self {
        PolynomialParams {
            n_features_in,
            degree,
            interaction_only,
            include_bias,
        }
        .into()
    }

    pub fn params(&self) -> &PolynomialParams {
        &self.params
    }

    /// Input indices forming each output column
    pub fn terms(&self) -> &[Vec<usize>] {
        &self.terms
    }
}

impl Stage for PolynomialFeatures {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        check_width(self, x)?;
        let mut out = Array2::<f64>::zeros((x.nrows(), self.terms.len()));
        for (row_in, mut row_out) in x.rows().into_iter().zip(out.rows_mut()) {
            for (v, term) in row_out.iter_mut().zip(&self.terms) {
                *v = term.iter().map(|&i| row_in[i]).product();
            }
        }
        check_finite(self, &out)?;
        Ok(out)
    }

    fn n_features_in(&self) -> usize {
        self.params.n_features_in
    }

    fn n_features_out(&self) -> usize {
        self.terms.len()
    }

    fn name(&self) -> &'static str {
        "polynomial_features"
    }
}
