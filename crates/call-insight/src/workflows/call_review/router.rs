use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error};

use super::domain::{AnalyzeRequest, ValidateRequest};
use super::service::{CallReviewError, CallReviewService};

const ANALYZE_FAILED: &str = "Failed to analyze transcript";
const VALIDATION_FAILED: &str = "Failed to process validation";

/// Router builder exposing the analysis and validation endpoints.
pub fn call_review_router(service: Arc<CallReviewService>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/validate", post(validate_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<CallReviewService>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    // An unreadable body is treated like a missing transcript.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(%rejection, "unreadable analyze payload");
            AnalyzeRequest::default()
        }
    };

    match service.analyze(request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err, ANALYZE_FAILED),
    }
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<CallReviewService>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(%rejection, "unreadable validate payload");
            ValidateRequest::default()
        }
    };

    match service.validate(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err, VALIDATION_FAILED),
    }
}

pub(crate) fn error_response(err: CallReviewError, failure_message: &'static str) -> Response {
    match err {
        CallReviewError::InvalidRequest(message) => {
            let payload = json!({ "error": message });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        other => {
            error!(error = %other, "{failure_message}");
            let payload = json!({ "error": failure_message });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
