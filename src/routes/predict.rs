use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::{EngineError, RawPredictRequest, RecommendationResult, Recommender};

// ---

pub fn router() -> Router<Arc<Recommender>> {
    // ---
    Router::new().route("/predict", post(handler))
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    success: bool,
    #[serde(flatten)]
    result: RecommendationResult,
    timestamp: DateTime<Utc>,
}

async fn handler(
    State(recommender): State<Arc<Recommender>>,
    payload: Result<Json<RawPredictRequest>, JsonRejection>,
) -> Response {
    // ---
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    async move {
        info!("POST /predict - Starting evaluation");

        let raw = match payload {
            Ok(Json(raw)) => raw,
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                return error_response(EngineError::invalid(rejection.body_text()));
            }
        };
        debug!("Request body: {:?}", raw);

        let outcome = raw
            .to_reading()
            .and_then(|reading| recommender.recommend(&reading));

        match outcome {
            Ok(result) => {
                info!(
                    "Recommended {} ({:?}), {} warnings",
                    result.predicted_crop,
                    result.confidence,
                    result.prediction_summary.total_warnings
                );
                let body = PredictResponse {
                    success: true,
                    result,
                    timestamp: Utc::now(),
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                error_response(e)
            }
        }
    }
    .instrument(span)
    .await
}

/// Map engine errors onto HTTP responses.
fn error_response(err: EngineError) -> Response {
    // ---
    match err {
        EngineError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        EngineError::ClassifierUnavailable(msg) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "classifier_unavailable",
            msg,
        ),
    }
}

fn json_error(status: StatusCode, code: &'static str, message: String) -> Response {
    // ---
    (
        status,
        Json(json!({
            "success": false,
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}
