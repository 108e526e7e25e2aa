//! Dropout Runtime - Feature reconciliation and inference
//!
//! This crate turns a partial user input into a prediction:
//! reconcile against the feature schema, run the fitted feature transform,
//! then ask the classifier for a probability distribution.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod result;
pub mod transform;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use model::{ModelInfo, ProbabilityModel, XgbBooster};
pub use pipeline::InferencePipeline;
pub use reconcile::{
    reconcile, ColumnStats, DefaultSource, FixedDefaults, LayeredDefaults, ReferenceDataset,
};
pub use result::Prediction;
pub use transform::{
    ColumnTransformer, FeatureTransform, HandleUnknown, TransformerKind, TransformerSpec,
};
