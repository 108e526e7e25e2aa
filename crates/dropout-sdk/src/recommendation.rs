//! Recommendation attached to a prediction

use dropout_core::StudentStatus;
use serde::{Deserialize, Serialize};

const URGENT_MESSAGE: &str = "This student shows a high risk of dropping out. \
     Schedule dedicated academic guidance and counselling promptly.";
const ROUTINE_MESSAGE: &str =
    "This student is on a safe track. Continue regular monitoring.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Routine,
}

/// Follow-up advice for a predicted label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub urgency: Urgency,
    pub message: String,
}

impl Recommendation {
    /// Dropout predictions are urgent; every other label is routine
    pub fn for_label(label: StudentStatus) -> Self {
        match label {
            StudentStatus::Dropout => Self {
                urgency: Urgency::Urgent,
                message: URGENT_MESSAGE.to_string(),
            },
            StudentStatus::Enrolled | StudentStatus::Graduate => Self {
                urgency: Urgency::Routine,
                message: ROUTINE_MESSAGE.to_string(),
            },
        }
    }
}
