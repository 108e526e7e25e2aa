//! Feature transform stage
//!
//! The transform is the fitted preprocessor that turns a reconciled record
//! into the numeric vector the classifier consumes.

mod column_transformer;

pub use column_transformer::{ColumnTransformer, HandleUnknown, TransformerKind, TransformerSpec};

use crate::error::Result;
use dropout_core::{FeatureSchema, ReconciledRecord};

/// Fitted feature transform
pub trait FeatureTransform: Send + Sync {
    /// Schema the transform expects, in input order
    fn schema(&self) -> &FeatureSchema;

    /// Width of the transformed vector
    fn output_width(&self) -> usize;

    /// Transform one reconciled row
    fn transform(&self, record: &ReconciledRecord) -> Result<Vec<f64>>;
}
