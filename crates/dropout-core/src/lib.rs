//! Dropout Core - Core types for the student dropout early-warning service
//!
//! This crate provides the fundamental types used across the workspace:
//! - Feature schema definitions (ordered fields, kinds, fill policies)
//! - User input and reconciled records
//! - Outcome labels and class probabilities
//! - Categorical form encodings
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    ClassProbabilities, FeatureSchema, FieldKind, FillPolicy, Gender, MaritalStatus,
    ReconciledRecord, RecordEntry, SchemaField, StudentStatus, UserInput, ValueSource, YesNo,
};
