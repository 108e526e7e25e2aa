//! Common test utilities for SDK integration tests
//!
//! Writes a small but complete artifact set: a preprocessor covering every
//! form column plus `Course`, a three-tree booster and a reference dataset.

#![allow(dead_code)]

use dropout_sdk::{PredictionService, PredictionServiceBuilder, RepositoryConfig};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

pub const PREPROCESSOR: &str = r#"{
    "transformers": [
        {"name": "num", "kind": "standard_scaler",
         "columns": ["Curricular_units_1st_sem_grade", "Curricular_units_2nd_sem_grade",
                     "Admission_grade", "Age_at_enrollment"],
         "mean": [10.0, 10.0, 127.0, 23.0], "scale": [5.0, 5.0, 14.0, 7.0]},
        {"name": "cat", "kind": "one_hot",
         "columns": ["Tuition_fees_up_to_date", "Scholarship_holder", "Debtor", "Gender",
                     "Marital_status", "Course"],
         "categories": [[0, 1], [0, 1], [0, 1], [0, 1], [1, 2, 3, 4, 5, 6], [33, 171, 9254]],
         "handle_unknown": "ignore"}
    ]
}"#;

/// Transformed width of [`PREPROCESSOR`]
pub const WIDTH: usize = 4 + 2 * 4 + 6 + 3;

pub const DATA: &str = "\
Marital_status;Course;Admission_grade;Tuition_fees_up_to_date;Debtor;Scholarship_holder;Gender;Age_at_enrollment;Curricular_units_1st_sem_grade;Curricular_units_2nd_sem_grade;Target
1;9254;127.3;1;0;0;1;20;12.5;13.0;Graduate
2;171;142.5;1;0;1;0;19;14.0;13.6;Graduate
1;9254;124.8;0;1;0;1;45;0;0;Dropout
1;33;119.6;1;0;0;0;20;11.2;10.8;Enrolled
4;9254;141.5;1;0;1;0;23;13.5;12.7;Graduate
";

/// Booster over `num_feature` inputs
///
/// - Dropout: sem-2 grade below 7.5 gives 1.5; otherwise tuition not up to
///   date gives 1.0, up to date gives -0.8
/// - Enrolled: constant 0.1
/// - Graduate: sem-1 grade below 11.5 gives -0.2, otherwise 0.9
pub fn model_json(num_feature: usize) -> String {
    let dropout = json!({
        "left_children": [1, -1, 3, -1, -1],
        "right_children": [2, -1, 4, -1, -1],
        "split_indices": [1, 0, 5, 0, 0],
        "split_conditions": [-0.5, 1.5, 0.5, 1.0, -0.8],
        "default_left": [0, 0, 0, 0, 0],
        "split_type": [0, 0, 0, 0, 0]
    });
    let enrolled = json!({
        "left_children": [-1], "right_children": [-1], "split_indices": [0],
        "split_conditions": [0.1], "default_left": [0]
    });
    let graduate = json!({
        "left_children": [1, -1, -1],
        "right_children": [2, -1, -1],
        "split_indices": [0, 0, 0],
        "split_conditions": [0.3, -0.2, 0.9],
        "default_left": [1, 0, 0]
    });

    json!({
        "learner": {
            "feature_names": [],
            "learner_model_param": {
                "base_score": "5E-1",
                "num_class": "3",
                "num_feature": num_feature.to_string()
            },
            "objective": {"name": "multi:softprob", "softmax_multiclass_param": {"num_class": "3"}},
            "gradient_booster": {
                "name": "gbtree",
                "model": {
                    "gbtree_model_param": {"num_trees": "3", "num_parallel_tree": "1"},
                    "tree_info": [0, 1, 2],
                    "trees": [dropout, enrolled, graduate]
                }
            }
        },
        "version": [2, 0, 3]
    })
    .to_string()
}

/// Write all artifacts into `dir`
pub fn write_artifacts(dir: &Path) {
    write_artifacts_with(dir, PREPROCESSOR, &model_json(WIDTH), DATA);
}

pub fn write_artifacts_with(dir: &Path, preprocessor: &str, model: &str, data: &str) {
    std::fs::write(dir.join("preprocessor.json"), preprocessor).unwrap();
    std::fs::write(dir.join("xgb_model.json"), model).unwrap();
    std::fs::write(dir.join("data.csv"), data).unwrap();
}

pub fn repository(dir: &TempDir) -> RepositoryConfig {
    RepositoryConfig::file_system(dir.path().to_string_lossy())
}

/// Temp directory holding the standard artifacts
pub fn artifact_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    dir
}

/// Service over the standard artifacts
pub async fn test_service() -> (TempDir, PredictionService) {
    let dir = artifact_dir();
    let service = PredictionServiceBuilder::new()
        .with_repository(repository(&dir))
        .build()
        .await
        .unwrap();
    (dir, service)
}

pub fn softmax(margins: [f64; 3]) -> [f64; 3] {
    let e = margins.map(f64::exp);
    let sum: f64 = e.iter().sum();
    e.map(|v| v / sum)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
