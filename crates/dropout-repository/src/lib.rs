//! Artifact repository for the dropout early-warning service
//!
//! Loads the three artifacts a prediction service needs:
//!
//! - the fitted preprocessor (`preprocessor.json`)
//! - the trained classifier (`xgb_model.json`)
//! - the reference dataset used for default fills (`data.csv`)
//!
//! # Quick Start
//!
//! ```no_run
//! use dropout_repository::{ArtifactLoader, RepositoryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = ArtifactLoader::from_config(RepositoryConfig::file_system("artifacts"))?;
//!     let bundle = loader.load_all().await?;
//!     println!("Loaded {} reference rows", bundle.reference.row_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod file_system;
pub mod loader;
pub mod traits;

pub use config::{ConfigError, RepositoryConfig};
pub use error::{RepositoryError, RepositoryResult};
pub use file_system::FileSystemRepository;
pub use loader::{ArtifactBundle, ArtifactLoader};
pub use traits::ArtifactRepository;
