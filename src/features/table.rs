//! Delimited-text table with a header row. Cells stay as text until the
//! required feature columns are selected by name.

use super::schema::{self, FEATURE_COUNT};
use crate::error::{PipelineError, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use ndarray::Array2;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Rows must all have one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            return Err(PipelineError::Schema(format!(
                "row {} has {} cells, header has {}",
                i + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        // undecodable bytes become U+FFFD so a bad cell fails as a number, not as a row
        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(|e| PipelineError::Schema(format!("failed to read header row: {}", e)))?
            .iter()
            .map(lossy)
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            let record = result
                .map_err(|e| PipelineError::Schema(format!("malformed row {}: {}", index + 1, e)))?;
            rows.push(record.iter().map(lossy).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PipelineError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| PipelineError::Schema(format!("table is not valid UTF-8: {}", e)))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column with this header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[i].as_str()).collect())
    }

    /// Schema fields with no column of that name
    pub fn missing_features(&self) -> Vec<&'static str> {
        schema::names().filter(|n| self.column_index(n).is_none()).collect()
    }

    /// Select the schema columns by name, in schema order, as an
    /// `rows x 24` matrix.
    ///
    /// Missing columns are a schema error and are checked before any cell
    /// is read. A cell that is not a finite number is a transform error for
    /// the whole table.
    pub fn feature_matrix(&self) -> Result<Array2<f64>> {
        let missing = self.missing_features();
        if !missing.is_empty() {
            return Err(PipelineError::Schema(format!(
                "table must include all features; missing: {}",
                missing.join(", ")
            )));
        }
        let indices: Vec<usize> = schema::names()
            .filter_map(|n| self.column_index(n))
            .collect();

        let mut out = Array2::<f64>::zeros((self.rows.len(), FEATURE_COUNT));
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &col) in indices.iter().enumerate() {
                let cell = row[col].as_str();
                let value = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        PipelineError::transform(
                            "input",
                            format!(
                                "row {} column '{}' is not a finite number: '{}'",
                                r + 1,
                                self.headers[col],
                                cell
                            ),
                        )
                    })?;
                out[[r, c]] = value;
            }
        }
        Ok(out)
    }

    /// Append a column, or overwrite it in place if the name already exists.
    pub fn with_column(mut self, name: &str, values: Vec<String>) -> Result<Self> {
        if values.len() != self.rows.len() {
            return Err(PipelineError::Schema(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        match self.column_index(name) {
            Some(i) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[i] = v;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(self)
    }
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
