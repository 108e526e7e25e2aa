//! Configuration types for PredictionService

use dropout_core::FillPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistic used to fill a missing field from the reference dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategy {
    #[default]
    Median,
    Mode,
}

impl FillStrategy {
    pub fn policy(self) -> FillPolicy {
        match self {
            FillStrategy::Median => FillPolicy::Median,
            FillStrategy::Mode => FillPolicy::Mode,
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Fill statistic for numeric fields
    pub numeric_fill: FillStrategy,

    /// Fill statistic for categorical fields
    pub categorical_fill: FillStrategy,

    /// Constant defaults consulted before the reference dataset
    pub fixed_defaults: HashMap<String, f64>,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric_fill(mut self, strategy: FillStrategy) -> Self {
        self.numeric_fill = strategy;
        self
    }

    pub fn with_categorical_fill(mut self, strategy: FillStrategy) -> Self {
        self.categorical_fill = strategy;
        self
    }

    /// Add a constant default for one field
    pub fn with_fixed_default(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fixed_defaults.insert(field.into(), value);
        self
    }
}
