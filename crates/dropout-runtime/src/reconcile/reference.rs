//! Reference dataset used to derive default fill values
//!
//! The dataset is a delimited text file with a header row. Statistics are
//! computed once at load time for every fully numeric column; columns holding
//! any non-numeric cell (such as the outcome label) are skipped.

use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

/// Per-column statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    /// Number of non-empty cells
    pub count: usize,
    pub median: f64,
    /// Most frequent value; the smallest wins ties
    pub mode: f64,
}

/// Column statistics computed from a reference dataset
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    columns: Vec<ColumnStats>,
    index: HashMap<String, usize>,
    skipped: Vec<String>,
    rows: usize,
}

impl ReferenceDataset {
    /// Parse delimited text with a header row
    pub fn parse(content: &str, delimiter: u8) -> Result<Self> {
        Self::from_reader(content.as_bytes(), delimiter)
    }

    /// Read and parse from any reader
    ///
    /// Cells may be quoted; a quoted cell can hold the delimiter.
    pub fn from_reader(reader: impl Read, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = reader
            .headers()
            .map_err(reference_error)?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if names.iter().all(String::is_empty) {
            return Err(RuntimeError::ReferenceData {
                line: 1,
                reason: "missing header row".to_string(),
            });
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        let mut numeric = vec![true; names.len()];
        let mut rows = 0;

        for record in reader.records() {
            let record = record.map_err(reference_error)?;
            for (col, cell) in record.iter().enumerate() {
                if !numeric[col] || cell.is_empty() {
                    continue;
                }
                match cell.parse::<f64>() {
                    Ok(v) if v.is_finite() => values[col].push(v),
                    _ => {
                        numeric[col] = false;
                        values[col].clear();
                    }
                }
            }
            rows += 1;
        }

        let mut dataset = ReferenceDataset {
            rows,
            ..Default::default()
        };

        for ((name, mut column), is_numeric) in names.into_iter().zip(values).zip(numeric) {
            if !is_numeric || column.is_empty() {
                debug!("Skipping non-numeric reference column: {}", name);
                dataset.skipped.push(name);
                continue;
            }
            if dataset.index.contains_key(&name) {
                return Err(RuntimeError::ReferenceData {
                    line: 1,
                    reason: format!("duplicate column '{}'", name),
                });
            }

            column.sort_by(f64::total_cmp);
            let stats = ColumnStats {
                count: column.len(),
                median: median_of_sorted(&column),
                mode: mode_of_sorted(&column),
                name: name.clone(),
            };
            dataset.index.insert(name, dataset.columns.len());
            dataset.columns.push(stats);
        }

        info!(
            "Loaded reference dataset: {} rows, {} numeric columns, {} skipped",
            dataset.rows,
            dataset.columns.len(),
            dataset.skipped.len()
        );

        Ok(dataset)
    }

    pub fn median(&self, column: &str) -> Option<f64> {
        self.stats(column).map(|s| s.median)
    }

    pub fn mode(&self, column: &str) -> Option<f64> {
        self.stats(column).map(|s| s.mode)
    }

    pub fn stats(&self, column: &str) -> Option<&ColumnStats> {
        self.index.get(column).map(|&i| &self.columns[i])
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Numeric columns in file order
    pub fn columns(&self) -> &[ColumnStats] {
        &self.columns
    }

    /// Columns ignored because they held non-numeric data
    pub fn skipped_columns(&self) -> &[String] {
        &self.skipped
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }
}

fn reference_error(err: csv::Error) -> RuntimeError {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} cells, found {}", expected_len, len),
        _ => err.to_string(),
    };
    match err.into_kind() {
        csv::ErrorKind::Io(e) => RuntimeError::Io(e),
        _ => RuntimeError::ReferenceData { line, reason },
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_run = 0;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best_run {
            best_run = j - i;
            best = sorted[i];
        }
        i = j;
    }
    best
}
