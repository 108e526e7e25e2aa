//! Student input form
//!
//! [`StudentForm`] is the set of controls a user fills in. Each control is
//! bound to one column of the reference dataset the model was trained on;
//! everything else is filled by default.

use crate::error::{Result, SdkError};
use dropout_core::{Gender, MaritalStatus, UserInput, YesNo};
use serde::{Deserialize, Serialize};
use serde_json::json;

const GRADE_RANGE: (f64, f64) = (0.0, 20.0);
const ADMISSION_RANGE: (f64, f64) = (95.0, 190.0);
const AGE_RANGE: (u32, u32) = (17, 70);
const GRADE_STEP: f64 = 0.1;

/// Form field name and the schema column it feeds, in display order
pub const FIELD_COLUMNS: [(&str, &str); 9] = [
    ("curricular_units_1st_sem_grade", "Curricular_units_1st_sem_grade"),
    ("curricular_units_2nd_sem_grade", "Curricular_units_2nd_sem_grade"),
    ("admission_grade", "Admission_grade"),
    ("tuition_fees_up_to_date", "Tuition_fees_up_to_date"),
    ("scholarship_holder", "Scholarship_holder"),
    ("debtor", "Debtor"),
    ("age_at_enrollment", "Age_at_enrollment"),
    ("gender", "Gender"),
    ("marital_status", "Marital_status"),
];

/// Values entered on the form
///
/// Missing fields take the controls' initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudentForm {
    /// Average first-semester grade, 0-20
    pub curricular_units_1st_sem_grade: f64,
    /// Average second-semester grade, 0-20
    pub curricular_units_2nd_sem_grade: f64,
    /// Admission grade, 95-190
    pub admission_grade: f64,
    pub tuition_fees_up_to_date: YesNo,
    pub scholarship_holder: YesNo,
    pub debtor: YesNo,
    /// Age at enrollment, 17-70
    pub age_at_enrollment: u32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            curricular_units_1st_sem_grade: 12.0,
            curricular_units_2nd_sem_grade: 12.0,
            admission_grade: 125.0,
            tuition_fees_up_to_date: YesNo::Yes,
            scholarship_holder: YesNo::No,
            debtor: YesNo::No,
            age_at_enrollment: 20,
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
        }
    }
}

impl StudentForm {
    /// Schema columns the form sets
    pub fn columns() -> impl Iterator<Item = &'static str> {
        FIELD_COLUMNS.iter().map(|(_, column)| *column)
    }

    /// Check every value against its control's range
    pub fn validate(&self) -> Result<()> {
        check_range(
            "curricular_units_1st_sem_grade",
            self.curricular_units_1st_sem_grade,
            GRADE_RANGE,
        )?;
        check_range(
            "curricular_units_2nd_sem_grade",
            self.curricular_units_2nd_sem_grade,
            GRADE_RANGE,
        )?;
        check_range("admission_grade", self.admission_grade, ADMISSION_RANGE)?;

        let (min, max) = AGE_RANGE;
        if !(min..=max).contains(&self.age_at_enrollment) {
            return Err(SdkError::InvalidInput(format!(
                "age_at_enrollment must be between {} and {}, got {}",
                min, max, self.age_at_enrollment
            )));
        }

        Ok(())
    }

    /// Encode the form as model input keyed by schema column
    pub fn to_user_input(&self) -> Result<UserInput> {
        self.validate()?;

        let values = [
            self.curricular_units_1st_sem_grade,
            self.curricular_units_2nd_sem_grade,
            self.admission_grade,
            self.tuition_fees_up_to_date.code(),
            self.scholarship_holder.code(),
            self.debtor.code(),
            f64::from(self.age_at_enrollment),
            self.gender.code(),
            self.marital_status.code(),
        ];

        Ok(FIELD_COLUMNS
            .iter()
            .zip(values)
            .map(|((_, column), value)| (*column, value))
            .collect())
    }

    /// Describe the form's controls for a UI to render
    pub fn descriptor() -> FormDescriptor {
        let defaults = Self::default();
        let yes_no = |first: YesNo| {
            let order = if first == YesNo::Yes {
                [YesNo::Yes, YesNo::No]
            } else {
                [YesNo::No, YesNo::Yes]
            };
            Control::Select {
                choices: order.iter().map(|c| Choice::new(c.label(), c.code())).collect(),
            }
        };
        let grade = Control::Number {
            min: GRADE_RANGE.0,
            max: GRADE_RANGE.1,
            step: GRADE_STEP,
        };

        let fields = vec![
            FormField::new(0, "Average Semester 1 Grade (0-20)", "academic", grade.clone())
                .with_default(json!(defaults.curricular_units_1st_sem_grade)),
            FormField::new(1, "Average Semester 2 Grade (0-20)", "academic", grade)
                .with_default(json!(defaults.curricular_units_2nd_sem_grade)),
            FormField::new(
                2,
                "Admission Grade (95-190)",
                "academic",
                Control::Number {
                    min: ADMISSION_RANGE.0,
                    max: ADMISSION_RANGE.1,
                    step: GRADE_STEP,
                },
            )
            .with_default(json!(defaults.admission_grade)),
            FormField::new(3, "Tuition Fees Up to Date?", "financial", yes_no(YesNo::Yes))
                .with_default(json!(defaults.tuition_fees_up_to_date)),
            FormField::new(4, "Scholarship Holder?", "financial", yes_no(YesNo::No))
                .with_default(json!(defaults.scholarship_holder)),
            FormField::new(5, "Has Debt?", "financial", yes_no(YesNo::No))
                .with_default(json!(defaults.debtor)),
            FormField::new(
                6,
                "Age at Enrollment",
                "personal",
                Control::Slider {
                    min: f64::from(AGE_RANGE.0),
                    max: f64::from(AGE_RANGE.1),
                    step: 1.0,
                },
            )
            .with_default(json!(defaults.age_at_enrollment)),
            FormField::new(
                7,
                "Gender",
                "personal",
                Control::Select {
                    choices: Gender::ALL
                        .iter()
                        .map(|g| Choice::new(g.label(), g.code()))
                        .collect(),
                },
            )
            .with_default(json!(defaults.gender)),
            FormField::new(
                8,
                "Marital Status",
                "personal",
                Control::Select {
                    choices: MaritalStatus::ALL
                        .iter()
                        .map(|m| Choice::new(m.label(), m.code()))
                        .collect(),
                },
            )
            .with_default(json!(defaults.marital_status)),
        ];

        FormDescriptor {
            title: "Student Dropout Early-Warning System".to_string(),
            description: "Enter the student's data to get a predicted status and dropout risk score."
                .to_string(),
            submit_label: "Analyze Student Risk".to_string(),
            fields,
        }
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(SdkError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Renderable description of the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescriptor {
    pub title: String,
    pub description: String,
    pub submit_label: String,
    pub fields: Vec<FormField>,
}

/// One labeled control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Key in [`StudentForm`]
    pub name: String,
    /// Schema column the value feeds
    pub column: String,
    pub label: String,
    /// Display group: academic, financial or personal
    pub group: String,
    pub control: Control,
    /// Initial value, in the form's JSON representation
    pub default: serde_json::Value,
}

impl FormField {
    fn new(index: usize, label: &str, group: &str, control: Control) -> Self {
        let (name, column) = FIELD_COLUMNS[index];
        Self {
            name: name.to_string(),
            column: column.to_string(),
            label: label.to_string(),
            group: group.to_string(),
            control,
            default: serde_json::Value::Null,
        }
    }

    fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = default;
        self
    }
}

/// Input control kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Number { min: f64, max: f64, step: f64 },
    Slider { min: f64, max: f64, step: f64 },
    Select { choices: Vec<Choice> },
}

/// Selectable option and the code it encodes to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub label: String,
    pub code: f64,
}

impl Choice {
    fn new(label: &str, code: f64) -> Self {
        Self {
            label: label.to_string(),
            code,
        }
    }
}
