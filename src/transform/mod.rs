//! Fitted preprocessing stages: standardize → power transform → polynomial expansion.
//!
//! Each stage is a pure function over a `rows x features` matrix with a
//! declared input and output width. Parameters are learned elsewhere and
//! only applied here.

mod polynomial;
mod power;
mod scaler;

pub use polynomial::PolynomialFeatures;
pub use power::{PowerMethod, PowerTransformer};
pub use scaler::StandardScaler;

use crate::error::{PipelineError, Result};
use ndarray::Array2;

/// One fitted, immutable transform stage.
pub trait Stage: Send + Sync {
    /// Apply the stage to every row.
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    fn n_features_in(&self) -> usize;

    fn n_features_out(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Shape check shared by all stages
pub(crate) fn check_width(stage: &dyn Stage, x: &Array2<f64>) -> Result<()> {
    if x.ncols() != stage.n_features_in() {
        return Err(PipelineError::transform(
            stage.name(),
            format!("expected {} features, got {}", stage.n_features_in(), x.ncols()),
        ));
    }
    Ok(())
}

/// Every output value must be finite; overflow in a stage is reported, not propagated.
pub(crate) fn check_finite(stage: &dyn Stage, out: &Array2<f64>) -> Result<()> {
    if let Some(((r, c), v)) = out.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(PipelineError::transform(
            stage.name(),
            format!("non-finite output {} at row {} feature {}", v, r + 1, c),
        ));
    }
    Ok(())
}
