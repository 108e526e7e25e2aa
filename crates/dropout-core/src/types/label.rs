//! Outcome labels and class probability distributions

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Student outcome predicted by the classifier
///
/// The discriminant is the class index the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    Dropout = 0,
    Enrolled = 1,
    Graduate = 2,
}

impl StudentStatus {
    /// All labels in class-index order
    pub const ALL: [StudentStatus; 3] = [
        StudentStatus::Dropout,
        StudentStatus::Enrolled,
        StudentStatus::Graduate,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Dropout => "Dropout",
            StudentStatus::Enrolled => "Enrolled",
            StudentStatus::Graduate => "Graduate",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability distribution over the three outcome labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub dropout: f64,
    pub enrolled: f64,
    pub graduate: f64,
}

impl ClassProbabilities {
    /// Build from a model output vector indexed by class
    pub fn from_slice(probabilities: &[f64]) -> Result<Self> {
        if probabilities.len() != StudentStatus::ALL.len() {
            return Err(CoreError::InvalidValue {
                field: "probabilities".to_string(),
                reason: format!(
                    "expected {} classes, got {}",
                    StudentStatus::ALL.len(),
                    probabilities.len()
                ),
            });
        }
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite()) {
            return Err(CoreError::InvalidValue {
                field: "probabilities".to_string(),
                reason: format!("non-finite probability {}", bad),
            });
        }

        Ok(Self {
            dropout: probabilities[0],
            enrolled: probabilities[1],
            graduate: probabilities[2],
        })
    }

    /// Probabilities in class-index order
    pub fn as_array(&self) -> [f64; 3] {
        [self.dropout, self.enrolled, self.graduate]
    }

    pub fn get(&self, status: StudentStatus) -> f64 {
        self.as_array()[status.index()]
    }

    /// Arg-max label; the lowest index wins ties
    pub fn argmax(&self) -> StudentStatus {
        let values = self.as_array();
        let mut best = 0;
        for (i, &p) in values.iter().enumerate().skip(1) {
            if p > values[best] {
                best = i;
            }
        }
        StudentStatus::ALL[best]
    }

    /// Probability mass on Dropout as a percentage
    pub fn dropout_risk(&self) -> f64 {
        self.dropout * 100.0
    }
}
