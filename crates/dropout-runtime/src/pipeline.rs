//! Two-stage inference pipeline: transform then predict

use crate::error::{Result, RuntimeError};
use crate::model::ProbabilityModel;
use crate::result::Prediction;
use crate::transform::FeatureTransform;
use dropout_core::{ClassProbabilities, FeatureSchema, ReconciledRecord, StudentStatus};
use std::sync::Arc;
use tracing::debug;

/// Fitted transform and classifier, checked against each other
#[derive(Clone)]
pub struct InferencePipeline {
    transform: Arc<dyn FeatureTransform>,
    model: Arc<dyn ProbabilityModel>,
}

impl InferencePipeline {
    /// Pair a transform with a classifier
    ///
    /// The transform's output width must equal the classifier's input width,
    /// and the classifier must produce one probability per outcome label.
    pub fn new(
        transform: Arc<dyn FeatureTransform>,
        model: Arc<dyn ProbabilityModel>,
    ) -> Result<Self> {
        if transform.output_width() != model.num_features() {
            return Err(RuntimeError::InvalidArtifact(format!(
                "preprocessor produces {} features but the classifier expects {}",
                transform.output_width(),
                model.num_features()
            )));
        }
        if model.num_classes() != StudentStatus::ALL.len() {
            return Err(RuntimeError::InvalidArtifact(format!(
                "classifier has {} classes, expected {}",
                model.num_classes(),
                StudentStatus::ALL.len()
            )));
        }

        Ok(Self { transform, model })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.transform.schema()
    }

    pub fn transform(&self) -> &Arc<dyn FeatureTransform> {
        &self.transform
    }

    pub fn model(&self) -> &Arc<dyn ProbabilityModel> {
        &self.model
    }

    /// Run one reconciled record through both stages
    pub fn run(&self, record: &ReconciledRecord) -> Result<Prediction> {
        let features = self.transform.transform(record)?;
        let output = self.model.predict_proba(&features)?;

        let probabilities = ClassProbabilities::from_slice(&output)
            .map_err(|e| RuntimeError::InvalidModelOutput(e.to_string()))?;
        let prediction = Prediction::from_probabilities(probabilities);

        debug!(
            "Predicted {} (dropout risk {})",
            prediction.label,
            prediction.risk_display()
        );

        Ok(prediction)
    }
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("schema", &self.transform.schema().name())
            .field("model", &self.model.info())
            .finish()
    }
}
