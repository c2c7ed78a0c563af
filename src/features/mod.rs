//! Fixed 24-field weather/case-count schema and the records built on it.

mod schema;
mod table;

pub use schema::{FeatureSpec, FEATURES, FEATURE_COUNT};
pub use table::Table;

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// One record in fixed schema order. Positional: index `i` is `FEATURES[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Form defaults: midpoint of every advisory range
    pub fn midpoints() -> Self {
        Self::from_fn(|spec| spec.midpoint())
    }

    pub fn minimums() -> Self {
        Self::from_fn(|spec| spec.min)
    }

    pub fn maximums() -> Self {
        Self::from_fn(|spec| spec.max)
    }

    fn from_fn(f: impl Fn(&FeatureSpec) -> f64) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (v, spec) in values.iter_mut().zip(FEATURES.iter()) {
            *v = f(spec);
        }
        Self { values }
    }

    /// Build from `(name, value)` pairs that must list exactly the schema
    /// fields in schema order.
    pub fn from_named<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [0.0; FEATURE_COUNT];
        let mut seen = 0usize;
        for (name, value) in fields {
            let Some(spec) = FEATURES.get(seen) else {
                return Err(PipelineError::Schema(format!("unexpected extra field '{}'", name)));
            };
            if spec.name != name {
                return Err(match schema::position(name) {
                    Some(pos) => PipelineError::Schema(format!(
                        "field '{}' at position {} but schema expects it at {} (expected '{}')",
                        name, seen, pos, spec.name
                    )),
                    None => PipelineError::Schema(format!(
                        "unknown field '{}' where '{}' was expected",
                        name, spec.name
                    )),
                });
            }
            values[seen] = value;
            seen += 1;
        }
        if seen < FEATURE_COUNT {
            let missing: Vec<&str> = FEATURES[seen..].iter().map(|s| s.name).collect();
            return Err(PipelineError::Schema(format!("missing fields: {}", missing.join(", "))));
        }
        let fv = Self { values };
        fv.validate()?;
        Ok(fv)
    }

    /// Same as [`from_named`](Self::from_named) for raw text values, e.g. form
    /// input; a value that does not parse as a number is a schema error.
    pub fn parse_named<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parsed = fields
            .into_iter()
            .map(|(name, raw)| parse_field(name, raw).map(|v| (name, v)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_named(parsed)
    }

    /// Every value must be finite.
    pub fn validate(&self) -> Result<()> {
        for (v, spec) in self.values.iter().zip(FEATURES.iter()) {
            if !v.is_finite() {
                return Err(PipelineError::Schema(format!("field '{}' is not a finite number", spec.name)));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        schema::position(name).map(|i| self.values[i])
    }

    /// Overwrite one field by name.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let i = schema::position(name)
            .ok_or_else(|| PipelineError::Schema(format!("unknown field '{}'", name)))?;
        self.values[i] = value;
        Ok(())
    }

    /// [`set`](Self::set) from raw text, parsed like [`parse_named`](Self::parse_named).
    pub fn set_text(&mut self, name: &str, raw: &str) -> Result<()> {
        let value = parse_field(name, raw)?;
        self.set(name, value)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURES.iter().zip(self.values.iter()).map(|(s, v)| (s.name, *v))
    }

    /// Fields outside their advisory range. Informational only.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        FEATURES
            .iter()
            .zip(self.values.iter())
            .filter(|(spec, v)| !spec.contains(**v))
            .map(|(spec, _)| spec.name)
            .collect()
    }
}

fn parse_field(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::Schema(format!("field '{}' is not numeric: '{}'", name, raw)))
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::midpoints()
    }
}
