//! Input and reconciled feature records

use super::schema::{FeatureSchema, FillPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partial mapping from field names to user-chosen values
///
/// Categorical choices are already encoded to their integer codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInput {
    values: BTreeMap<String, f64>,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Insert a value, returning the previous one if any
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for UserInput {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Where a reconciled value came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Supplied by the user
    User,
    /// Filled by the field's default policy
    Filled(FillPolicy),
}

/// One column of a reconciled record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub name: String,
    pub value: f64,
    pub source: ValueSource,
}

/// Single-row record holding every schema field in schema order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReconciledRecord {
    entries: Vec<RecordEntry>,
}

impl ReconciledRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append the next column
    pub fn push(&mut self, name: impl Into<String>, value: f64, source: ValueSource) {
        self.entries.push(RecordEntry {
            name: name.into(),
            value,
            source,
        });
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Column names in record order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Values in record order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of columns filled from defaults
    pub fn filled_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.source, ValueSource::Filled(_)))
            .count()
    }

    /// True when the columns are exactly the schema's fields, in schema order
    pub fn matches_schema(&self, schema: &FeatureSchema) -> bool {
        self.len() == schema.len() && self.names().eq(schema.field_names())
    }
}
