//! Reference dataset: training-data distributions to compare an input against.
//! Fetching is best-effort; any failure degrades to [`Insights::Unavailable`].

use crate::config::ReferenceConfig;
use crate::error::PipelineError;
use crate::features::{FeatureVector, Table};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Index column dropped from the reference dataset
const SERIAL_COLUMN: &str = "serial";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDistribution {
    pub feature: String,
    pub histogram: Histogram,
    pub summary: BoxSummary,
    /// The user's value, drawn as a marker line
    pub input: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Insights {
    Available(Vec<FeatureDistribution>),
    Unavailable(String),
}

/// Why the reference dataset could not be used. Never fatal.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference dataset disabled")]
    Disabled,

    #[error("reference dataset request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reference dataset request failed: {0}")]
    Status(reqwest::StatusCode),

    #[error("reference dataset is not a readable table: {0}")]
    Parse(#[from] PipelineError),
}

pub struct ReferenceDataset {
    table: Table,
}

impl ReferenceDataset {
    /// Fetch and parse the dataset with a bounded timeout.
    pub fn fetch(config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        if !config.enabled {
            return Err(ReferenceError::Disabled);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(5)))
            .build()?;
        let res = client.get(&config.url).send()?;
        if !res.status().is_success() {
            return Err(ReferenceError::Status(res.status()));
        }
        let body = res.text()?;
        let dataset = Self::from_csv_str(&body)?;
        info!(rows = dataset.table.len(), "reference dataset loaded");
        Ok(dataset)
    }

    pub fn from_csv_str(content: &str) -> Result<Self, ReferenceError> {
        let table = Table::from_csv_str(content)?;
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: Table) -> Self {
        let table = match table.column_index(SERIAL_COLUMN) {
            Some(i) => {
                let headers = table
                    .headers()
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, h)| h.clone())
                    .collect();
                let rows = table
                    .rows()
                    .iter()
                    .map(|r| {
                        r.iter()
                            .enumerate()
                            .filter(|(j, _)| *j != i)
                            .map(|(_, c)| c.clone())
                            .collect()
                    })
                    .collect();
                // dropping the same column from every row keeps rows rectangular
                Table::new(headers, rows).unwrap_or(table)
            }
            None => table,
        };
        Self { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Numeric values of a column; unparsable cells are skipped.
    pub fn values(&self, feature: &str) -> Option<Vec<f64>> {
        let column = self.table.column(feature)?;
        Some(
            column
                .into_iter()
                .filter_map(|c| c.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect(),
        )
    }

    pub fn distribution(&self, feature: &str, bins: usize, input: Option<f64>) -> Option<FeatureDistribution> {
        let mut values = self.values(feature)?;
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(FeatureDistribution {
            feature: feature.to_string(),
            histogram: histogram(&values, bins.max(1)),
            summary: box_summary(&values),
            input,
        })
    }

    /// Distributions of the configured key features against `input`.
    pub fn insights(&self, config: &ReferenceConfig, input: &FeatureVector) -> Insights {
        let distributions: Vec<_> = config
            .key_features
            .iter()
            .filter_map(|f| self.distribution(f, config.bins, input.get(f)))
            .collect();
        if distributions.is_empty() {
            return Insights::Unavailable("reference dataset has none of the key features".to_string());
        }
        Insights::Available(distributions)
    }
}

/// Fetch then summarize, degrading on any failure.
pub fn insights_for(config: &ReferenceConfig, input: &FeatureVector) -> Insights {
    match ReferenceDataset::fetch(config) {
        Ok(dataset) => dataset.insights(config, input),
        Err(e) => {
            warn!(error = %e, "reference dataset unavailable");
            Insights::Unavailable(e.to_string())
        }
    }
}

/// `sorted` must be non-empty and ascending.
fn histogram(sorted: &[f64], bins: usize) -> Histogram {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let mut counts = vec![0u64; bins];
    let width = (max - min) / bins as f64;
    for &v in sorted {
        let i = if width > 0.0 {
            (((v - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[i] += 1;
    }
    Histogram { min, max, counts }
}

/// Linear-interpolated quantile of ascending data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn box_summary(sorted: &[f64]) -> BoxSummary {
    BoxSummary {
        min: sorted[0],
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}
