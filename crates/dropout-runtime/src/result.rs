//! Prediction result

use dropout_core::{ClassProbabilities, StudentStatus};
use serde::{Deserialize, Serialize};

/// Outcome of one inference run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability per outcome label
    pub probabilities: ClassProbabilities,

    /// Arg-max label
    pub label: StudentStatus,

    /// Dropout probability as a percentage
    pub dropout_risk: f64,
}

impl Prediction {
    pub fn from_probabilities(probabilities: ClassProbabilities) -> Self {
        Self {
            label: probabilities.argmax(),
            dropout_risk: probabilities.dropout_risk(),
            probabilities,
        }
    }

    /// Confidence reported alongside the label, as a percentage
    ///
    /// Only Dropout and Graduate verdicts carry a confidence.
    pub fn confidence(&self) -> Option<f64> {
        match self.label {
            StudentStatus::Dropout | StudentStatus::Graduate => {
                Some(self.probabilities.get(self.label) * 100.0)
            }
            StudentStatus::Enrolled => None,
        }
    }

    /// Risk score for display, e.g. "63.27%"
    pub fn risk_display(&self) -> String {
        format!("{:.2}%", self.dropout_risk)
    }

    /// Confidence for display, e.g. "63%"
    pub fn confidence_display(&self) -> Option<String> {
        self.confidence().map(|c| format!("{:.0}%", c))
    }
}
