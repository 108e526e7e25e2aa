//! Feature schema definitions
//!
//! A feature schema is the ordered, named set of inputs a trained model
//! requires. Order is significant: the transform stage consumes columns
//! positionally.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Continuous or count-valued input
    Numeric,
    /// Category encoded as an integer code
    Categorical,
}

impl FieldKind {
    /// Get kind name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "numeric",
            FieldKind::Categorical => "categorical",
        }
    }
}

/// How a field is filled when the user does not supply it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Median of the column in the reference dataset
    Median,
    /// Most frequent value of the column in the reference dataset
    Mode,
    /// Constant fallback
    Fixed(f64),
}

impl Default for FillPolicy {
    fn default() -> Self {
        FillPolicy::Median
    }
}

impl FillPolicy {
    /// Short name used in logs and responses
    pub fn name(&self) -> &'static str {
        match self {
            FillPolicy::Median => "median",
            FillPolicy::Mode => "mode",
            FillPolicy::Fixed(_) => "fixed",
        }
    }
}

/// A field in a feature schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Column name as the preprocessor knows it
    pub name: String,

    /// Field kind
    pub kind: FieldKind,

    /// Default-fill policy
    #[serde(default)]
    pub fill: FillPolicy,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaField {
    /// Create a new field with the median fill policy
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fill: FillPolicy::Median,
            description: None,
        }
    }

    /// Create a numeric field
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Numeric)
    }

    /// Create a categorical field
    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Categorical)
    }

    /// Set fill policy
    pub fn with_fill(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered feature schema with unique field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct FeatureSchema {
    name: String,
    fields: Vec<SchemaField>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct RawSchema {
    name: String,
    fields: Vec<SchemaField>,
}

impl TryFrom<RawSchema> for FeatureSchema {
    type Error = CoreError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        FeatureSchema::new(raw.name, raw.fields)
    }
}

impl From<FeatureSchema> for RawSchema {
    fn from(schema: FeatureSchema) -> Self {
        RawSchema {
            name: schema.name,
            fields: schema.fields,
        }
    }
}

impl FeatureSchema {
    /// Create a schema from ordered fields; names must be unique
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Result<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), position).is_some() {
                return Err(CoreError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            fields,
            index,
        })
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in schema order
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Field names in schema order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&SchemaField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Position of a field in schema order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Override the fill policy of one field
    pub fn set_fill(&mut self, name: &str, fill: FillPolicy) -> Result<()> {
        let position = self
            .position(name)
            .ok_or_else(|| CoreError::FieldNotFound(name.to_string()))?;
        self.fields[position].fill = fill;
        Ok(())
    }

    /// Set the fill policy of every field of the given kind
    pub fn set_fill_for_kind(&mut self, kind: FieldKind, fill: FillPolicy) {
        for field in self.fields.iter_mut().filter(|f| f.kind == kind) {
            field.fill = fill;
        }
    }
}
