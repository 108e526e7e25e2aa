//! Default value sources for fields missing from user input

use super::reference::ReferenceDataset;
use dropout_core::{FillPolicy, SchemaField};
use std::collections::HashMap;

/// Supplies a default for a schema field according to its fill policy
pub trait DefaultSource: Send + Sync {
    /// Default value for `field`, or `None` if this source cannot produce one
    fn default_for(&self, field: &SchemaField) -> Option<f64>;

    /// Short name used in logs
    fn describe(&self) -> &'static str;
}

impl DefaultSource for ReferenceDataset {
    fn default_for(&self, field: &SchemaField) -> Option<f64> {
        match field.fill {
            FillPolicy::Median => self.median(&field.name),
            FillPolicy::Mode => self.mode(&field.name),
            FillPolicy::Fixed(value) => Some(value),
        }
    }

    fn describe(&self) -> &'static str {
        "reference dataset"
    }
}

/// Constant fallbacks keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FixedDefaults {
    values: HashMap<String, f64>,
}

impl FixedDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, f64>> for FixedDefaults {
    fn from(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

impl DefaultSource for FixedDefaults {
    fn default_for(&self, field: &SchemaField) -> Option<f64> {
        self.get(&field.name)
    }

    fn describe(&self) -> &'static str {
        "fixed constants"
    }
}

/// Tries each source in order and returns the first default found
pub struct LayeredDefaults {
    layers: Vec<Box<dyn DefaultSource>>,
}

impl LayeredDefaults {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a lower-priority layer
    pub fn then(mut self, source: impl DefaultSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayeredDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultSource for LayeredDefaults {
    fn default_for(&self, field: &SchemaField) -> Option<f64> {
        self.layers.iter().find_map(|layer| layer.default_for(field))
    }

    fn describe(&self) -> &'static str {
        "layered"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::parse("Debtor;Admission_grade\n0;100\n1;110\n0;150\n0;160\n", b';').unwrap()
    }

    #[test]
    fn test_dataset_follows_policy() {
        let ds = dataset();
        let median = SchemaField::numeric("Admission_grade");
        assert_eq!(ds.default_for(&median), Some(130.0));

        let mode = SchemaField::categorical("Debtor").with_fill(FillPolicy::Mode);
        assert_eq!(ds.default_for(&mode), Some(0.0));

        let missing = SchemaField::numeric("Course");
        assert_eq!(ds.default_for(&missing), None);
    }

    #[test]
    fn test_fixed_defaults_ignore_policy() {
        let fixed = FixedDefaults::new().with("Course", 9254.0);
        assert_eq!(fixed.default_for(&SchemaField::numeric("Course")), Some(9254.0));
        assert_eq!(fixed.default_for(&SchemaField::numeric("Debtor")), None);
    }

    #[test]
    fn test_layered_prefers_first_layer() {
        let layered = LayeredDefaults::new()
            .then(FixedDefaults::new().with("Admission_grade", 95.0))
            .then(dataset());

        assert_eq!(layered.len(), 2);
        assert_eq!(
            layered.default_for(&SchemaField::numeric("Admission_grade")),
            Some(95.0)
        );
        assert_eq!(
            layered.default_for(&SchemaField::numeric("Debtor")),
            Some(0.0)
        );
        assert_eq!(layered.default_for(&SchemaField::numeric("Course")), None);
    }
}
