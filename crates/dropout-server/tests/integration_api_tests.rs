//! Integration tests for REST API endpoints
//!
//! Each test builds a real PredictionService from on-disk artifacts and
//! drives the router with `oneshot`.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::*;
use dropout_server::config::ServerConfig;
use serde_json::json;

// ========== Read-only Endpoints ==========

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = test_router().await;

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_form_endpoint_lists_controls() {
    let (_dir, app) = test_router().await;

    let (status, body) = get(&app, "/v1/form").await;

    assert_eq!(status, StatusCode::OK);
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 9);

    let debtor = fields.iter().find(|f| f["name"] == "debtor").unwrap();
    assert_eq!(debtor["column"], "Debtor");
    assert_eq!(debtor["control"]["type"], "select");
    assert_eq!(debtor["default"], "No");
}

#[tokio::test]
async fn test_model_endpoint_summarizes_artifacts() {
    let (_dir, app) = test_router().await;

    let (status, body) = get(&app, "/v1/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["num_features"], WIDTH);
    assert_eq!(body["model"]["num_classes"], 3);
    assert_eq!(body["model"]["objective"], "multi:softprob");
    assert_eq!(body["labels"], json!(["Dropout", "Enrolled", "Graduate"]));
    assert_eq!(body["schema"]["fields"].as_array().unwrap().len(), 10);
    assert_eq!(body["reference_rows"], 5);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_dir, app) = test_router().await;

    let (status, _) = get(&app, "/v1/decide").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== Prediction Endpoint ==========

#[tokio::test]
async fn test_predict_default_form() {
    let (_dir, app) = test_router().await;

    let (status, body) = post_json(&app, "/v1/predict", json!({"student": {}})).await;

    assert_eq!(status, StatusCode::OK);
    let expected = softmax([-0.3, 0.6, 1.4]);
    let prediction = &body["prediction"];
    assert_eq!(prediction["label"], "Graduate");
    assert_close(prediction["probabilities"]["dropout"].as_f64().unwrap(), expected[0]);
    assert_close(prediction["probabilities"]["graduate"].as_f64().unwrap(), expected[2]);
    assert_close(prediction["dropout_risk"].as_f64().unwrap(), expected[0] * 100.0);

    assert_eq!(
        body["dropout_risk_display"],
        format!("{:.2}%", expected[0] * 100.0)
    );
    assert_eq!(body["recommendation"]["urgency"], "routine");
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
    assert!(body.get("features").is_none());
}

#[tokio::test]
async fn test_predict_struggling_student() {
    let (_dir, app) = test_router().await;

    let request = json!({
        "request_id": "req_client_1",
        "student": {
            "curricular_units_1st_sem_grade": 5.0,
            "curricular_units_2nd_sem_grade": 5.0,
            "tuition_fees_up_to_date": "No",
            "debtor": "Yes"
        }
    });
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], "req_client_1");
    assert_eq!(body["prediction"]["label"], "Dropout");
    assert_eq!(body["recommendation"]["urgency"], "urgent");

    let expected = softmax([2.0, 0.6, 0.3]);
    assert_eq!(
        body["confidence_display"],
        format!("{:.0}%", expected[0] * 100.0)
    );
}

#[tokio::test]
async fn test_predict_returns_reconciled_features() {
    let (_dir, app) = test_router().await;

    let request = json!({
        "student": {"admission_grade": 140.0},
        "features": {"Course": 171},
        "options": {"return_features": true}
    });
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::OK);
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 10);

    let course = features.iter().find(|e| e["name"] == "Course").unwrap();
    assert_eq!(course["value"], 171.0);
    assert_eq!(course["source"], "user");

    let admission = features
        .iter()
        .find(|e| e["name"] == "Admission_grade")
        .unwrap();
    assert_eq!(admission["value"], 140.0);
}

#[tokio::test]
async fn test_predict_fills_missing_fields_from_reference() {
    let (_dir, app) = test_router().await;

    let request = json!({"options": {"return_features": true}});
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::OK);
    let features = body["features"].as_array().unwrap();
    assert!(features
        .iter()
        .all(|e| e["source"] == json!({"filled": "median"})));

    let admission = features
        .iter()
        .find(|e| e["name"] == "Admission_grade")
        .unwrap();
    assert_eq!(admission["value"], 127.3);
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let (_dir, app) = test_router().await;
    let request = json!({
        "request_id": "req_same",
        "student": {"age_at_enrollment": 31, "gender": "Female"}
    });

    let (_, first) = post_json(&app, "/v1/predict", request.clone()).await;
    let (_, second) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(first["prediction"], second["prediction"]);
    assert_eq!(first["dropout_risk_display"], second["dropout_risk_display"]);
}

// ========== Error Mapping ==========

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let (_dir, app) = test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/predict")
        .header("content-type", "application/json")
        .body(Body::from("{\"student\": {"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_predict_unknown_choice_is_bad_request() {
    let (_dir, app) = test_router().await;

    let request = json!({"student": {"marital_status": "Engaged"}});
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unknown choice 'Engaged'"));
}

#[tokio::test]
async fn test_predict_out_of_range_is_bad_request() {
    let (_dir, app) = test_router().await;

    let request = json!({"student": {"age_at_enrollment": 12}});
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("retryable").is_none());
}

#[tokio::test]
async fn test_predict_unknown_feature_is_bad_request() {
    let (_dir, app) = test_router().await;

    let request = json!({"features": {"Nacionality": 1}});
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Nacionality"));
}

#[tokio::test]
async fn test_predict_field_without_default_is_unprocessable() {
    let (_dir, app) = test_router_with(&without_course(DATA)).await;

    let (status, body) = post_json(&app, "/v1/predict", json!({"student": {}})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("Course"));

    // the service stays usable
    let request = json!({"student": {}, "features": {"Course": 33}});
    let (status, _) = post_json(&app, "/v1/predict", request).await;
    assert_eq!(status, StatusCode::OK);
}

// ========== Configuration ==========

#[tokio::test]
async fn test_fixed_default_from_config_file() {
    let config: ServerConfig = config::Config::builder()
        .add_source(config::File::from_str(
            "[service.fixed_defaults]\nCourse = 9254.0\n",
            config::FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    let (_dir, app) = test_router_with_config(&without_course(DATA), config.service).await;

    let request = json!({"student": {}, "options": {"return_features": true}});
    let (status, body) = post_json(&app, "/v1/predict", request).await;

    assert_eq!(status, StatusCode::OK);
    let course = body["features"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Course")
        .unwrap()
        .clone();
    assert_eq!(course["value"], 9254.0);
    assert_eq!(course["source"], json!({"filled": {"fixed": 9254.0}}));
}
