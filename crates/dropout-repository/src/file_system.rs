//! File system based repository implementation

use async_trait::async_trait;
use dropout_runtime::{ColumnTransformer, ReferenceDataset, RuntimeError, XgbBooster};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::ArtifactRepository;

/// Loads artifacts from files in one directory
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    /// Absolute root of the repository
    root_path: PathBuf,
    config: RepositoryConfig,
    delimiter: u8,
}

impl FileSystemRepository {
    /// Create a repository over `config.base_path`
    ///
    /// # Example
    /// ```no_run
    /// use dropout_repository::{FileSystemRepository, RepositoryConfig};
    ///
    /// let repo = FileSystemRepository::new(RepositoryConfig::file_system("artifacts")).unwrap();
    /// ```
    pub fn new(config: RepositoryConfig) -> RepositoryResult<Self> {
        config
            .validate()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;
        let delimiter = config
            .delimiter_byte()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;

        let path = Path::new(&config.base_path);
        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let root_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        Ok(Self {
            root_path,
            config,
            delimiter,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Resolve a file name relative to the repository root
    fn resolve_path(&self, file: &str) -> PathBuf {
        self.root_path.join(file)
    }

    async fn read_artifact(&self, file: &str) -> RepositoryResult<(String, String)> {
        let path = self.resolve_path(file);
        let location = path.display().to_string();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(RepositoryError::NotFound { path: location });
        }

        let content = fs::read_to_string(&path).await?;
        debug!("Read artifact {} ({} bytes)", location, content.len());
        Ok((location, content))
    }
}

fn invalid(path: String) -> impl FnOnce(RuntimeError) -> RepositoryError {
    move |source| RepositoryError::Artifact { path, source }
}

#[async_trait]
impl ArtifactRepository for FileSystemRepository {
    async fn load_preprocessor(&self) -> RepositoryResult<ColumnTransformer> {
        let (path, content) = self.read_artifact(&self.config.preprocessor_file).await?;
        ColumnTransformer::from_json(&content).map_err(invalid(path))
    }

    async fn load_model(&self) -> RepositoryResult<XgbBooster> {
        let (path, content) = self.read_artifact(&self.config.model_file).await?;
        XgbBooster::from_json(&content).map_err(invalid(path))
    }

    async fn load_reference(&self) -> RepositoryResult<ReferenceDataset> {
        let (path, content) = self.read_artifact(&self.config.reference_file).await?;
        ReferenceDataset::parse(&content, self.delimiter).map_err(invalid(path))
    }

    async fn exists(&self, file: &str) -> RepositoryResult<bool> {
        Ok(fs::try_exists(self.resolve_path(file)).await?)
    }

    fn location(&self) -> String {
        self.root_path.display().to_string()
    }
}
