//! Column transformer loaded from a JSON export of a fitted preprocessor
//!
//! ```json
//! { "transformers": [
//!     { "name": "num", "kind": "standard_scaler", "columns": ["Admission_grade"],
//!       "mean": [126.9], "scale": [14.5] },
//!     { "name": "cat", "kind": "one_hot", "columns": ["Gender"],
//!       "categories": [[0, 1]], "handle_unknown": "ignore" },
//!     { "name": "rest", "kind": "passthrough", "columns": ["Debtor"] }
//! ] }
//! ```
//!
//! The input columns, taken in transformer order, define the feature schema.

use super::FeatureTransform;
use crate::error::{Result, RuntimeError};
use dropout_core::{FeatureSchema, ReconciledRecord, SchemaField};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::info;

/// Behaviour of a one-hot encoder on categories not seen during fitting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Emit all zeros
    #[default]
    Ignore,
    /// Fail the transform
    Error,
}

/// Fitted parameters of one transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformerKind {
    /// `(x - mean) / scale`
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// One output per fitted category
    OneHot {
        categories: Vec<Vec<f64>>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    /// Copy values unchanged
    Passthrough,
}

/// One named transformer applied to a group of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerSpec {
    pub name: String,

    #[serde(flatten)]
    pub kind: TransformerKind,

    pub columns: Vec<String>,
}

impl TransformerSpec {
    /// Number of output values this transformer produces
    fn output_width(&self) -> usize {
        match &self.kind {
            TransformerKind::OneHot { categories, .. } => categories.iter().map(Vec::len).sum(),
            TransformerKind::StandardScaler { .. } | TransformerKind::Passthrough => {
                self.columns.len()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let n = self.columns.len();
        let invalid = |reason: String| {
            Err(RuntimeError::InvalidArtifact(format!(
                "transformer '{}': {}",
                self.name, reason
            )))
        };

        if n == 0 {
            return invalid("no columns".to_string());
        }

        match &self.kind {
            TransformerKind::StandardScaler { mean, scale } => {
                if mean.len() != n || scale.len() != n {
                    return invalid(format!(
                        "{} columns but {} means and {} scales",
                        n,
                        mean.len(),
                        scale.len()
                    ));
                }
                if mean.iter().chain(scale).any(|v| !v.is_finite()) {
                    return invalid("non-finite scaler parameter".to_string());
                }
            }
            TransformerKind::OneHot { categories, .. } => {
                if categories.len() != n {
                    return invalid(format!(
                        "{} columns but {} category lists",
                        n,
                        categories.len()
                    ));
                }
                if let Some(i) = categories.iter().position(Vec::is_empty) {
                    return invalid(format!("column '{}' has no categories", self.columns[i]));
                }
            }
            TransformerKind::Passthrough => {}
        }

        Ok(())
    }

    fn schema_field(&self, column: &str) -> SchemaField {
        match self.kind {
            TransformerKind::OneHot { .. } => SchemaField::categorical(column),
            _ => SchemaField::numeric(column),
        }
    }

    fn apply(&self, values: &[f64], out: &mut Vec<f64>) -> Result<()> {
        match &self.kind {
            TransformerKind::StandardScaler { mean, scale } => {
                for ((x, m), s) in values.iter().zip(mean).zip(scale) {
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    out.push((x - m) / s);
                }
            }
            TransformerKind::OneHot {
                categories,
                handle_unknown,
            } => {
                for ((x, cats), column) in values.iter().zip(categories).zip(&self.columns) {
                    let hit = cats.iter().position(|c| c == x);
                    if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(RuntimeError::UnknownCategory {
                            column: column.clone(),
                            value: *x,
                        });
                    }
                    out.extend((0..cats.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                }
            }
            TransformerKind::Passthrough => out.extend_from_slice(values),
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ColumnTransformerSpec {
    transformers: Vec<TransformerSpec>,
}

/// Fitted column transformer
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    transformers: Vec<TransformerSpec>,
    schema: FeatureSchema,
    width: usize,
}

impl ColumnTransformer {
    /// Build from transformer specs, validating their parameters
    pub fn new(transformers: Vec<TransformerSpec>) -> Result<Self> {
        if transformers.is_empty() {
            return Err(RuntimeError::InvalidArtifact(
                "preprocessor has no transformers".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for spec in &transformers {
            spec.validate()?;
            for column in &spec.columns {
                if !seen.insert(column.as_str()) {
                    return Err(RuntimeError::InvalidArtifact(format!(
                        "column '{}' is used by more than one transformer",
                        column
                    )));
                }
                fields.push(spec.schema_field(column));
            }
        }

        let schema = FeatureSchema::new("preprocessor", fields)?;
        let width = transformers.iter().map(TransformerSpec::output_width).sum();

        info!(
            "Column transformer ready: {} transformers, {} input columns, {} outputs",
            transformers.len(),
            schema.len(),
            width
        );

        Ok(Self {
            transformers,
            schema,
            width,
        })
    }

    /// Parse the JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ColumnTransformerSpec = serde_json::from_str(json)?;
        Self::new(spec.transformers)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let spec: ColumnTransformerSpec = serde_json::from_reader(reader)?;
        Self::new(spec.transformers)
    }

    pub fn transformers(&self) -> &[TransformerSpec] {
        &self.transformers
    }
}

impl FeatureTransform for ColumnTransformer {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn output_width(&self) -> usize {
        self.width
    }

    fn transform(&self, record: &ReconciledRecord) -> Result<Vec<f64>> {
        if record.len() != self.schema.len() {
            return Err(RuntimeError::FeatureWidthMismatch {
                expected: self.schema.len(),
                actual: record.len(),
            });
        }
        for (position, (expected, actual)) in self.schema.field_names().zip(record.names()).enumerate() {
            if expected != actual {
                return Err(RuntimeError::ColumnOrderMismatch {
                    position,
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        let values = record.values();
        let mut out = Vec::with_capacity(self.width);
        let mut offset = 0;
        for spec in &self.transformers {
            let end = offset + spec.columns.len();
            spec.apply(&values[offset..end], &mut out)?;
            offset = end;
        }

        Ok(out)
    }
}
