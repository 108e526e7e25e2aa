//! Dropout early-warning SDK
//!
//! High-level API for building a prediction service from artifacts and
//! assessing students with it.

pub mod builder;
pub mod config;
pub mod error;
pub mod form;
pub mod recommendation;
pub mod service;

// Re-export main types
pub use builder::PredictionServiceBuilder;
pub use config::{FillStrategy, ServiceConfig};
pub use error::{Result, SdkError};
pub use form::{Choice, Control, FormDescriptor, FormField, StudentForm};
pub use recommendation::{Recommendation, Urgency};
pub use service::{
    PredictionOptions, PredictionRequest, PredictionResponse, PredictionService, ServiceStatus,
};

// Re-export commonly used types from dependencies
pub use dropout_core::{
    ClassProbabilities, FeatureSchema, Gender, MaritalStatus, ReconciledRecord, StudentStatus,
    UserInput, YesNo,
};
pub use dropout_repository::{ArtifactBundle, RepositoryConfig};
pub use dropout_runtime::{ModelInfo, Prediction, RuntimeError};
