//! Fitted regressor and class-label mapping.

mod forest;
mod labels;

pub use forest::{ForestRegressor, RegressionTree, LEAF};
pub use labels::LabelEncoder;
