//! Type system for the dropout service
//!
//! This module contains:
//! - Feature schema definitions
//! - Input and reconciled records
//! - Outcome labels
//! - Categorical encodings used by the form

pub mod encoding;
pub mod label;
pub mod record;
pub mod schema;

pub use encoding::{Gender, MaritalStatus, YesNo};
pub use label::{ClassProbabilities, StudentStatus};
pub use record::{ReconciledRecord, RecordEntry, UserInput, ValueSource};
pub use schema::{FeatureSchema, FieldKind, FillPolicy, SchemaField};
