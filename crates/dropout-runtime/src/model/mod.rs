//! Classifier stage

mod xgboost;

pub use xgboost::XgbBooster;

use crate::error::Result;
use serde::Serialize;

/// Summary of a loaded classifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    /// Model family, e.g. "xgboost"
    pub kind: String,
    pub objective: String,
    pub num_features: usize,
    pub num_classes: usize,
    /// Number of trees, for tree ensembles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_trees: Option<usize>,
}

/// Classifier returning a probability distribution over classes
pub trait ProbabilityModel: Send + Sync {
    /// Width of the feature vector the model consumes
    fn num_features(&self) -> usize;

    fn num_classes(&self) -> usize;

    fn info(&self) -> ModelInfo;

    /// Class probabilities for one transformed row, indexed by class
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;
}
