//! Repository trait

use crate::error::RepositoryResult;
use async_trait::async_trait;
use dropout_runtime::{ColumnTransformer, ReferenceDataset, XgbBooster};

/// Source of the artifacts a prediction service is built from
///
/// Each call reads and validates the artifact afresh; callers load once at
/// startup and share the result.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Load the fitted preprocessor
    async fn load_preprocessor(&self) -> RepositoryResult<ColumnTransformer>;

    /// Load the trained classifier
    async fn load_model(&self) -> RepositoryResult<XgbBooster>;

    /// Load the reference dataset used for default fills
    async fn load_reference(&self) -> RepositoryResult<ReferenceDataset>;

    /// Check if an artifact file exists
    async fn exists(&self, file: &str) -> RepositoryResult<bool>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}
