//! Categorical encodings for form selectors
//!
//! Each selector shows human-readable choices and feeds the integer code the
//! model was trained on. Deserialization goes through `FromStr`, so an
//! unrecognised label surfaces as [`CoreError::UnknownChoice`].

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Yes/No selector (Yes = 1, No = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    pub fn code(self) -> f64 {
        match self {
            YesNo::Yes => 1.0,
            YesNo::No => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl TryFrom<String> for YesNo {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for YesNo {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Yes" => Ok(YesNo::Yes),
            "No" => Ok(YesNo::No),
            other => Err(CoreError::UnknownChoice {
                kind: "yes/no",
                value: other.to_string(),
            }),
        }
    }
}

/// Gender selector (Male = 1, Female = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| CoreError::UnknownChoice {
                kind: "gender",
                value: s.to_string(),
            })
    }
}

/// Marital status selector, coded 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MaritalStatus {
    Single,
    Married,
    Widower,
    Divorced,
    #[serde(rename = "Facto Union")]
    FactoUnion,
    #[serde(rename = "Legally Separated")]
    LegallySeparated,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 6] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Widower,
        MaritalStatus::Divorced,
        MaritalStatus::FactoUnion,
        MaritalStatus::LegallySeparated,
    ];

    pub fn code(self) -> f64 {
        match self {
            MaritalStatus::Single => 1.0,
            MaritalStatus::Married => 2.0,
            MaritalStatus::Widower => 3.0,
            MaritalStatus::Divorced => 4.0,
            MaritalStatus::FactoUnion => 5.0,
            MaritalStatus::LegallySeparated => 6.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Widower => "Widower",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::FactoUnion => "Facto Union",
            MaritalStatus::LegallySeparated => "Legally Separated",
        }
    }
}

impl TryFrom<String> for MaritalStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for MaritalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        MaritalStatus::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| CoreError::UnknownChoice {
                kind: "marital status",
                value: s.to_string(),
            })
    }
}
