use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

use crop_advisor::classifier::{CropModel, ModelArtifacts};
use crop_advisor::{routes, Recommender};

/// Model whose intercepts alone decide the ranking: Paddy > Wheat > Cotton > Pulses.
fn create_test_app() -> Result<Router> {
    // ---
    let artifact = json!({
        "scaler": { "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0] },
        "classifier": {
            "coefficients": [
                [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            ],
            "intercepts": [0.5, 1.0, 0.0, 0.8]
        },
        "encoder": { "classes": ["Cotton", "Paddy", "Pulses", "Wheat"] }
    });
    let artifacts = ModelArtifacts::from_slice(&serde_json::to_vec(&artifact)?, "test")?;
    let recommender = Recommender::new(CropModel::from_artifacts(artifacts));
    Ok(routes::router(Arc::new(recommender)))
}

async fn post_predict(app: Router, body: Value) -> Result<(StatusCode, Value)> {
    // ---
    post_predict_raw(app, serde_json::to_vec(&body)?).await
}

async fn post_predict_raw(app: Router, body: Vec<u8>) -> Result<(StatusCode, Value)> {
    // ---
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(body))?,
        )
        .await?;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn health_endpoint_reports_healthy() -> Result<()> {
    // ---
    let app = create_test_app()?;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn predict_returns_full_recommendation() -> Result<()> {
    // ---
    // Humid, wet clay: Paddy keeps its lead.
    let (status, body) = post_predict(
        create_test_app()?,
        json!({"temperature": 28.0, "humidity": 85.0, "moisture": 80.0, "soil_type": 2, "rainfall": 3.0}),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["predicted_crop"], "Paddy");
    assert_eq!(body["soil_conditions"]["type"], "Clay");
    assert_eq!(body["fertilizer"]["primary"], "NPK (20-10-10)");
    assert_eq!(body["irrigation"]["confidence"], "High");
    assert!(body["warnings"].is_array());
    assert_eq!(body["prediction_summary"]["overall_suitability"], "Good");
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn predict_accepts_legacy_field_names() -> Result<()> {
    // ---
    // Extreme heat on dry sand: Cotton's heat multipliers overtake Paddy.
    let (status, body) = post_predict(
        create_test_app()?,
        json!({"Temparature": 45.0, "Humidity": 20.0, "Moisture": 5.0, "Soil Type": 1, "Rainfall": 0.0}),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_crop"], "Cotton");
    assert_eq!(body["warnings"][0]["severity"], "critical");
    assert_eq!(body["warnings"][0]["category"], "temperature");
    assert_eq!(body["prediction_summary"]["critical_warnings"], 2);
    assert_eq!(
        body["prediction_summary"]["overall_suitability"],
        "Caution Required"
    );

    Ok(())
}

#[tokio::test]
async fn predict_rejects_unknown_soil_type() -> Result<()> {
    // ---
    let (status, body) = post_predict(
        create_test_app()?,
        json!({"temperature": 25.0, "humidity": 60.0, "moisture": 40.0, "soil_type": 7}),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["success"], false);

    Ok(())
}

#[tokio::test]
async fn predict_rejects_missing_fields() -> Result<()> {
    // ---
    let (status, body) = post_predict(create_test_app()?, json!({"temperature": 25.0})).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("humidity"));

    Ok(())
}

#[tokio::test]
async fn predict_rejects_non_numeric_reading() -> Result<()> {
    // ---
    let (status, body) = post_predict(
        create_test_app()?,
        json!({"temperature": "hot", "humidity": 60.0, "moisture": 40.0, "soil_type": 0}),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_input");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("temperature"));

    Ok(())
}

#[tokio::test]
async fn predict_rejects_malformed_body_as_json() -> Result<()> {
    // ---
    let (status, body) =
        post_predict_raw(create_test_app()?, br#"{"temperature": 25.0, "humid"#.to_vec()).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_input");

    Ok(())
}

#[tokio::test]
async fn predict_coerces_numeric_strings_and_float_codes() -> Result<()> {
    // ---
    let (status, body) = post_predict(
        create_test_app()?,
        json!({"temperature": "28", "humidity": 85.0, "moisture": "80.0", "soil_type": 2.0}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["soil_conditions"]["type"], "Clay");

    let (status, body) = post_predict(
        create_test_app()?,
        json!({"temperature": 28.0, "humidity": 85.0, "moisture": 80.0, "soil_type": "1"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["soil_conditions"]["type"], "Sandy");

    Ok(())
}

#[tokio::test]
async fn identical_requests_produce_identical_results() -> Result<()> {
    // ---
    let request = json!({"temperature": 24.0, "humidity": 65.0, "moisture": 45.0, "soil_type": 0});

    let (_, mut first) = post_predict(create_test_app()?, request.clone()).await?;
    let (_, mut second) = post_predict(create_test_app()?, request).await?;

    // Only the response timestamp may differ.
    first["timestamp"] = Value::Null;
    second["timestamp"] = Value::Null;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn shipped_model_responds_to_the_reading() -> Result<()> {
    // ---
    let bytes = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/models/crop_model.json"))?;
    let model = CropModel::from_artifacts(ModelArtifacts::from_slice(&bytes, "shipped")?);

    let cool_dry = model.classify(&[15.0, 40.0, 6.5, 0.0, 40.0, 40.0, 40.0, 0.0, 25.0])?;
    let hot_wet = model.classify(&[34.0, 85.0, 6.5, 20.0, 60.0, 40.0, 40.0, 2.0, 80.0])?;
    assert_ne!(cool_dry, hot_wet);

    Ok(())
}
