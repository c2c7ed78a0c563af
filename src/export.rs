//! Delimited-text downloads: input template, batch results, session history.

use crate::error::{PipelineError, Result};
use crate::features::{Table, FEATURES};
use crate::session::PredictionRecord;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub const TEMPLATE_FILE: &str = "template.csv";
pub const BATCH_FILE: &str = "batch_predictions.csv";
pub const HISTORY_FILE: &str = "prediction_history.csv";
/// First column of the history export
pub const HISTORY_LABEL_COLUMN: &str = "Prediction";

/// A file offered back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

impl Download {
    fn csv(file_name: &'static str, contents: String) -> Self {
        Self {
            file_name,
            mime: "text/csv",
            contents,
        }
    }

    /// Inline link target for browsers
    pub fn data_uri(&self) -> String {
        format!("data:file/csv;base64,{}", BASE64.encode(self.contents.as_bytes()))
    }

    pub fn write_to(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, &self.contents).map_err(PipelineError::from)
    }
}

/// Header row of the 24 schema fields, no data rows
pub fn template() -> Result<Download> {
    let table = Table::new(FEATURES.iter().map(|s| s.name.to_string()).collect(), Vec::new())?;
    Ok(Download::csv(TEMPLATE_FILE, table.to_csv_string()?))
}

pub fn batch_results(table: &Table) -> Result<Download> {
    Ok(Download::csv(BATCH_FILE, table.to_csv_string()?))
}

/// `Prediction` followed by the 24 input fields, one row per record.
pub fn history_table(history: &[PredictionRecord]) -> Result<Table> {
    let headers = std::iter::once(HISTORY_LABEL_COLUMN.to_string())
        .chain(FEATURES.iter().map(|s| s.name.to_string()))
        .collect();
    let rows = history
        .iter()
        .map(|record| {
            std::iter::once(record.label.clone())
                .chain(record.input.values().iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();
    Table::new(headers, rows)
}

pub fn history(history: &[PredictionRecord]) -> Result<Download> {
    Ok(Download::csv(HISTORY_FILE, history_table(history)?.to_csv_string()?))
}
