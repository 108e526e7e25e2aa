//! Repository configuration types

use serde::{Deserialize, Serialize};

/// Where the artifact files live and what they are called
///
/// # Examples
///
/// ```rust
/// use dropout_repository::RepositoryConfig;
///
/// let config = RepositoryConfig::file_system("artifacts")
///     .with_model_file("booster.json")
///     .with_delimiter(',');
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Directory holding the artifact files
    pub base_path: String,

    /// Fitted preprocessor export
    pub preprocessor_file: String,

    /// XGBoost JSON model
    pub model_file: String,

    /// Reference dataset
    pub reference_file: String,

    /// Reference dataset cell delimiter
    pub delimiter: char,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_path: "artifacts".to_string(),
            preprocessor_file: "preprocessor.json".to_string(),
            model_file: "xgb_model.json".to_string(),
            reference_file: "data.csv".to_string(),
            delimiter: ';',
        }
    }
}

impl RepositoryConfig {
    /// Default file names under `path`
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            base_path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_preprocessor_file(mut self, file: impl Into<String>) -> Self {
        self.preprocessor_file = file.into();
        self
    }

    pub fn with_model_file(mut self, file: impl Into<String>) -> Self {
        self.model_file = file.into();
        self
    }

    pub fn with_reference_file(mut self, file: impl Into<String>) -> Self {
        self.reference_file = file.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Delimiter as the byte the dataset parser expects
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ConfigError::InvalidDelimiter(self.delimiter))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("base_path", &self.base_path),
            ("preprocessor_file", &self.preprocessor_file),
            ("model_file", &self.model_file),
            ("reference_file", &self.reference_file),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }
        self.delimiter_byte()?;
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required setting is empty
    MissingField(String),
    /// Delimiter is not a single ASCII character
    InvalidDelimiter(char),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField(field) => write!(f, "{} must be set", field),
            ConfigError::InvalidDelimiter(c) => {
                write!(f, "delimiter {:?} is not an ASCII character", c)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepositoryConfig::default();
        assert_eq!(config.base_path, "artifacts");
        assert_eq!(config.preprocessor_file, "preprocessor.json");
        assert_eq!(config.model_file, "xgb_model.json");
        assert_eq!(config.reference_file, "data.csv");
        assert_eq!(config.delimiter_byte(), Ok(b';'));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RepositoryConfig::file_system("/srv/models")
            .with_preprocessor_file("pre.json")
            .with_reference_file("students.csv")
            .with_delimiter(',');

        assert_eq!(config.base_path, "/srv/models");
        assert_eq!(config.preprocessor_file, "pre.json");
        assert_eq!(config.model_file, "xgb_model.json");
        assert_eq!(config.reference_file, "students.csv");
        assert_eq!(config.delimiter_byte(), Ok(b','));
    }

    #[test]
    fn test_validation_missing_field() {
        let config = RepositoryConfig::file_system("artifacts").with_model_file("  ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField("model_file".to_string()))
        );
    }

    #[test]
    fn test_validation_non_ascii_delimiter() {
        let config = RepositoryConfig::default().with_delimiter('§');
        assert_eq!(config.validate(), Err(ConfigError::InvalidDelimiter('§')));
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "delimiter '§' is not an ASCII character"
        );
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: RepositoryConfig =
            serde_json::from_str(r#"{"base_path": "models"}"#).unwrap();
        assert_eq!(config.base_path, "models");
        assert_eq!(config.model_file, "xgb_model.json");
        assert_eq!(config.delimiter, ';');
    }
}
