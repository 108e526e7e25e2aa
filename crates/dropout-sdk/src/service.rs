//! PredictionService and its request/response types

use crate::config::ServiceConfig;
use crate::error::{Result, SdkError};
use crate::form::{FormDescriptor, StudentForm};
use crate::recommendation::Recommendation;
use chrono::{DateTime, Utc};
use dropout_core::{FeatureSchema, ReconciledRecord, StudentStatus, UserInput};
use dropout_runtime::{reconcile, DefaultSource, InferencePipeline, ModelInfo, Prediction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Prediction request options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionOptions {
    /// Include the reconciled feature record in the response
    #[serde(default)]
    pub return_features: bool,
}

/// Prediction request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Caller-supplied request ID; generated when absent
    #[serde(default)]
    pub request_id: Option<String>,

    /// Values entered on the form
    #[serde(default)]
    pub student: Option<StudentForm>,

    /// Raw schema features not covered by the form
    #[serde(default)]
    pub features: BTreeMap<String, f64>,

    #[serde(default)]
    pub options: PredictionOptions,
}

impl PredictionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_student(mut self, student: StudentForm) -> Self {
        self.student = Some(student);
        self
    }

    /// Add a raw schema feature
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Include the reconciled record in the response
    pub fn with_features_returned(mut self) -> Self {
        self.options.return_features = true;
        self
    }

    /// Merge form values and raw features into one input
    ///
    /// A column set by both is rejected rather than silently overridden.
    pub fn to_user_input(&self) -> Result<UserInput> {
        let mut input = match &self.student {
            Some(student) => student.to_user_input()?,
            None => UserInput::new(),
        };

        for (name, value) in &self.features {
            if input.contains(name) {
                return Err(SdkError::InvalidInput(format!(
                    "field '{}' is set by both the form and the features map",
                    name
                )));
            }
            input.insert(name.clone(), *value);
        }

        Ok(input)
    }
}

/// Prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    pub prediction: Prediction,

    /// Dropout risk formatted for display, e.g. "63.27%"
    pub dropout_risk_display: String,

    /// Confidence of the label for display; absent for Enrolled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_display: Option<String>,

    pub recommendation: Recommendation,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Reconciled record (only present if return_features was set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<ReconciledRecord>,
}

/// Summary of the loaded service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub schema: FeatureSchema,
    pub model: ModelInfo,
    pub labels: Vec<StudentStatus>,
    pub form_fields: usize,
    pub reference_rows: usize,
    pub artifact_location: String,
    pub loaded_at: DateTime<Utc>,
}

/// Prediction service built once from loaded artifacts
///
/// Holds only read-only state, so one instance can serve concurrent
/// requests behind an `Arc`.
pub struct PredictionService {
    schema: FeatureSchema,
    pipeline: InferencePipeline,
    defaults: Arc<dyn DefaultSource>,
    config: ServiceConfig,
    reference_rows: usize,
    location: String,
    loaded_at: DateTime<Utc>,
}

impl PredictionService {
    pub(crate) fn new(
        schema: FeatureSchema,
        pipeline: InferencePipeline,
        defaults: Arc<dyn DefaultSource>,
        config: ServiceConfig,
        reference_rows: usize,
        location: String,
    ) -> Self {
        Self {
            schema,
            pipeline,
            defaults,
            config,
            reference_rows,
            location,
            loaded_at: Utc::now(),
        }
    }

    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_xxxxxx
    fn generate_request_id() -> String {
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

        format!("req_{}_{:06x}", datetime_str, random)
    }

    /// Feature schema with the configured fill policies
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Form descriptor for the UI
    pub fn form(&self) -> FormDescriptor {
        StudentForm::descriptor()
    }

    /// Complete a partial input against the schema
    pub fn reconcile(&self, input: &UserInput) -> Result<ReconciledRecord> {
        Ok(reconcile(input, &self.schema, self.defaults.as_ref())?)
    }

    /// Reconcile, transform and classify one input
    pub fn predict(&self, input: &UserInput) -> Result<Prediction> {
        let record = self.reconcile(input)?;
        self.run(&record)
    }

    fn run(&self, record: &ReconciledRecord) -> Result<Prediction> {
        self.pipeline.run(record).map_err(|e| {
            let e = SdkError::from(e);
            if e.is_retryable() {
                error!("Inference failed: {}", e);
            }
            e
        })
    }

    /// Handle one prediction request end to end
    pub fn assess(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        let start = std::time::Instant::now();

        let request_id = match &request.request_id {
            Some(id) => id.clone(),
            None => {
                let id = Self::generate_request_id();
                debug!("Generated new request_id: {}", id);
                id
            }
        };

        let input = request.to_user_input()?;
        let record = self.reconcile(&input)?;
        let prediction = self.run(&record)?;

        debug!(
            "request_id={} label={} risk={} ({} fields defaulted)",
            request_id,
            prediction.label,
            prediction.risk_display(),
            record.filled_count()
        );

        Ok(PredictionResponse {
            request_id,
            dropout_risk_display: prediction.risk_display(),
            confidence_display: prediction.confidence_display(),
            recommendation: Recommendation::for_label(prediction.label),
            prediction,
            processing_time_ms: start.elapsed().as_millis() as u64,
            features: request.options.return_features.then_some(record),
        })
    }

    /// Summary of the loaded artifacts
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            schema: self.schema.clone(),
            model: self.pipeline.model().info(),
            labels: StudentStatus::ALL.to_vec(),
            form_fields: StudentForm::columns().count(),
            reference_rows: self.reference_rows,
            artifact_location: self.location.clone(),
            loaded_at: self.loaded_at,
        }
    }
}
