//! Builder pattern for PredictionService

use crate::config::{FillStrategy, ServiceConfig};
use crate::error::{Result, SdkError};
use crate::form::StudentForm;
use crate::service::PredictionService;
use dropout_core::{FeatureSchema, FieldKind, FillPolicy};
use dropout_repository::{ArtifactBundle, ArtifactLoader, RepositoryConfig};
use dropout_runtime::{
    DefaultSource, FeatureTransform, FixedDefaults, InferencePipeline, LayeredDefaults,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for PredictionService
///
/// # Example
///
/// ```rust,ignore
/// use dropout_sdk::{PredictionServiceBuilder, RepositoryConfig};
///
/// let service = PredictionServiceBuilder::new()
///     .with_repository(RepositoryConfig::file_system("artifacts"))
///     .build()
///     .await?;
/// ```
pub struct PredictionServiceBuilder {
    config: ServiceConfig,
    repository_config: Option<RepositoryConfig>,
    artifacts: Option<ArtifactBundle>,
}

impl PredictionServiceBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            repository_config: None,
            artifacts: None,
        }
    }

    /// Load artifacts from a repository at build time
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.repository_config = Some(config);
        self
    }

    /// Use artifacts that are already loaded
    pub fn with_artifacts(mut self, bundle: ArtifactBundle) -> Self {
        self.artifacts = Some(bundle);
        self
    }

    /// Replace the service configuration
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_numeric_fill(mut self, strategy: FillStrategy) -> Self {
        self.config.numeric_fill = strategy;
        self
    }

    pub fn with_categorical_fill(mut self, strategy: FillStrategy) -> Self {
        self.config.categorical_fill = strategy;
        self
    }

    /// Add a constant default for one field
    pub fn with_fixed_default(mut self, field: impl Into<String>, value: f64) -> Self {
        self.config.fixed_defaults.insert(field.into(), value);
        self
    }

    /// Build the prediction service
    ///
    /// Loads the artifacts if a repository was configured, then checks them
    /// against each other. Any failure here is a configuration error.
    pub async fn build(self) -> Result<PredictionService> {
        let bundle = match (self.artifacts, &self.repository_config) {
            (Some(bundle), _) => bundle,
            (None, Some(repo_config)) => {
                let loader = ArtifactLoader::from_config(repo_config.clone())
                    .map_err(|e| SdkError::ConfigError(format!("Failed to open repository: {}", e)))?;
                loader.load_all().await.map_err(|e| {
                    SdkError::ConfigError(format!("Failed to load artifacts: {}", e))
                })?
            }
            (None, None) => {
                return Err(SdkError::ConfigError(
                    "no artifacts or repository configured".to_string(),
                ))
            }
        };

        assemble(self.config, bundle)
    }
}

impl Default for PredictionServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble(config: ServiceConfig, bundle: ArtifactBundle) -> Result<PredictionService> {
    let ArtifactBundle {
        transform,
        model,
        reference,
        location,
    } = bundle;

    let mut schema = transform.schema().clone();
    if schema.is_empty() {
        return Err(SdkError::ConfigError("feature schema is empty".to_string()));
    }
    schema.set_fill_for_kind(FieldKind::Numeric, config.numeric_fill.policy());
    schema.set_fill_for_kind(FieldKind::Categorical, config.categorical_fill.policy());

    let mut fixed_defaults = HashMap::with_capacity(config.fixed_defaults.len());
    for (name, &value) in &config.fixed_defaults {
        let column = resolve_column(&schema, name)?;
        schema
            .set_fill(&column, FillPolicy::Fixed(value))
            .map_err(|e| SdkError::ConfigError(e.to_string()))?;
        fixed_defaults.insert(column, value);
    }
    if let Some(column) = StudentForm::columns().find(|c| !schema.contains(c)) {
        return Err(SdkError::ConfigError(format!(
            "form field '{}' is not in the feature schema",
            column
        )));
    }

    let reference_rows = reference.row_count();
    let pipeline = InferencePipeline::new(Arc::new(transform), Arc::new(model))
        .map_err(|e| SdkError::ConfigError(e.to_string()))?;

    let defaults = LayeredDefaults::new()
        .then(FixedDefaults::from(fixed_defaults))
        .then(reference);

    let undefaulted: Vec<&str> = schema
        .fields()
        .iter()
        .filter(|f| defaults.default_for(f).is_none())
        .map(|f| f.name.as_str())
        .collect();
    if !undefaulted.is_empty() {
        warn!(
            "{} schema fields have no default and must be supplied by the caller: {}",
            undefaulted.len(),
            undefaulted.join(", ")
        );
    }

    info!(
        "Prediction service ready: {} schema fields, {} form fields, {} defaulted",
        schema.len(),
        StudentForm::columns().count(),
        schema.len() - undefaulted.len()
    );

    Ok(PredictionService::new(
        schema,
        pipeline,
        Arc::new(defaults),
        config,
        reference_rows,
        location,
    ))
}

/// Schema column a configured name refers to
///
/// Configuration sources may lowercase keys, so an exact match is tried
/// first and then a unique case-insensitive one.
fn resolve_column(schema: &FeatureSchema, name: &str) -> Result<String> {
    if schema.contains(name) {
        return Ok(name.to_string());
    }

    let mut matches = schema
        .field_names()
        .filter(|field| field.eq_ignore_ascii_case(name));
    match (matches.next(), matches.next()) {
        (Some(field), None) => Ok(field.to_string()),
        (Some(_), Some(_)) => Err(SdkError::ConfigError(format!(
            "fixed default '{}' matches more than one schema field",
            name
        ))),
        (None, _) => Err(SdkError::ConfigError(format!(
            "fixed default configured for '{}', which is not in the feature schema",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_without_artifacts_fails() {
        let result = PredictionServiceBuilder::new().build().await;
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_build_with_missing_repository_fails() {
        let result = PredictionServiceBuilder::new()
            .with_repository(RepositoryConfig::file_system("/nonexistent/artifacts"))
            .build()
            .await;

        match result {
            Err(SdkError::ConfigError(msg)) => assert!(msg.contains("Failed to open repository")),
            Err(other) => panic!("Expected ConfigError, got {:?}", other),
            Ok(_) => panic!("Expected ConfigError, got a service"),
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            "preprocessor",
            vec![
                dropout_core::SchemaField::numeric("Course"),
                dropout_core::SchemaField::numeric("Debtor"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_column_exact_and_lowercased() {
        let schema = schema();
        assert_eq!(resolve_column(&schema, "Course").unwrap(), "Course");
        assert_eq!(resolve_column(&schema, "course").unwrap(), "Course");

        let err = resolve_column(&schema, "nacionality").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(ref msg) if msg.contains("nacionality")));
    }

    #[test]
    fn test_resolve_column_rejects_ambiguous_name() {
        let schema = FeatureSchema::new(
            "preprocessor",
            vec![
                dropout_core::SchemaField::numeric("GDP"),
                dropout_core::SchemaField::numeric("gdp"),
            ],
        )
        .unwrap();

        let err = resolve_column(&schema, "Gdp").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(ref msg) if msg.contains("more than one")));
    }

    #[test]
    fn test_builder_config_methods() {
        let builder = PredictionServiceBuilder::new()
            .with_categorical_fill(FillStrategy::Mode)
            .with_fixed_default("Course", 9254.0);

        assert_eq!(builder.config.categorical_fill, FillStrategy::Mode);
        assert_eq!(builder.config.fixed_defaults.len(), 1);
        assert!(builder.repository_config.is_none());
    }
}
