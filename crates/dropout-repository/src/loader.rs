//! Artifact bundle loader

use crate::config::RepositoryConfig;
use crate::error::RepositoryResult;
use crate::file_system::FileSystemRepository;
use crate::traits::ArtifactRepository;
use dropout_runtime::{ColumnTransformer, FeatureTransform, ReferenceDataset, XgbBooster};
use std::sync::Arc;
use tracing::info;

/// Everything a prediction service is built from
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub transform: ColumnTransformer,
    pub model: XgbBooster,
    pub reference: ReferenceDataset,
    /// Where the artifacts were loaded from
    pub location: String,
}

/// Loads a complete [`ArtifactBundle`] from a repository
///
/// # Example
///
/// ```rust,ignore
/// use dropout_repository::{ArtifactLoader, RepositoryConfig};
///
/// let loader = ArtifactLoader::from_config(RepositoryConfig::file_system("artifacts"))?;
/// let bundle = loader.load_all().await?;
/// ```
pub struct ArtifactLoader {
    repository: Arc<dyn ArtifactRepository>,
}

impl ArtifactLoader {
    pub fn new(repository: Arc<dyn ArtifactRepository>) -> Self {
        Self { repository }
    }

    /// File system loader for `config`
    pub fn from_config(config: RepositoryConfig) -> RepositoryResult<Self> {
        Ok(Self::new(Arc::new(FileSystemRepository::new(config)?)))
    }

    /// Load all three artifacts; the first failure aborts the load
    pub async fn load_all(&self) -> RepositoryResult<ArtifactBundle> {
        let location = self.repository.location();
        info!("Loading artifacts from {}", location);

        let transform = self.repository.load_preprocessor().await?;
        let model = self.repository.load_model().await?;
        let reference = self.repository.load_reference().await?;

        info!(
            "Artifacts loaded: {} input columns, {} trees, {} reference rows",
            transform.schema().len(),
            model.num_trees(),
            reference.row_count()
        );

        Ok(ArtifactBundle {
            transform,
            model,
            reference,
            location,
        })
    }
}
