use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EvaluationId, Submission};
use super::payments::{PaymentError, PaymentGateway};
use super::repository::{EvaluationRepository, RepositoryError};
use super::service::{EvaluationServiceError, PitchEvaluationService};

#[derive(Debug, Deserialize)]
pub(crate) struct UnlockRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntentRequest {
    pub evaluation_id: EvaluationId,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Router builder exposing validation, evaluation, unlock and payment endpoints.
pub fn pitch_router<R, G>(service: Arc<PitchEvaluationService<R, G>>) -> Router
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    Router::new()
        .route("/api/v1/pitch/validate", post(validate_handler::<R, G>))
        .route("/api/v1/pitch/evaluations", post(evaluate_handler::<R, G>))
        .route(
            "/api/v1/pitch/evaluations/:evaluation_id",
            get(evaluation_handler::<R, G>),
        )
        .route(
            "/api/v1/pitch/evaluations/:evaluation_id/unlock",
            post(unlock_handler::<R, G>),
        )
        .route("/api/v1/payments/intents", post(intent_handler::<R, G>))
        .route("/api/v1/payments/config", get(payment_config_handler::<R, G>))
        .with_state(service)
}

pub(crate) async fn validate_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
    Json(submission): Json<Submission>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    let report = service.validate(&submission);
    let payload = json!({
        "success": report.is_valid(),
        "validation_errors": report.validation_errors,
        "anti_gaming_flags": report.anti_gaming_flags,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
    Json(submission): Json<Submission>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    match service.evaluate(submission) {
        Ok(record) => {
            let payload = json!({
                "evaluation_id": record.id,
                "total_score": record.total_score,
                "section_scores": record.section_scores,
                "verdict": record.verdict,
                "executive_summary": record.executive_summary,
                "premium_locked": !record.premium_unlocked,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    match service.get(&EvaluationId(evaluation_id)) {
        Ok(record) => (StatusCode::OK, Json(record.public_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unlock_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
    Path(evaluation_id): Path<String>,
    Json(request): Json<UnlockRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    match service.unlock_premium(&EvaluationId(evaluation_id), &request.payment_intent_id) {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn intent_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
    Json(request): Json<IntentRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    match service.create_payment_intent(&request.evaluation_id, request.amount, request.currency) {
        Ok(intent) => (StatusCode::CREATED, Json(intent)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn payment_config_handler<R, G>(
    State(service): State<Arc<PitchEvaluationService<R, G>>>,
) -> Response
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    (StatusCode::OK, Json(service.payment_config())).into_response()
}

pub(crate) fn status_for(error: &EvaluationServiceError) -> StatusCode {
    match error {
        EvaluationServiceError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EvaluationServiceError::Repository(
            RepositoryError::AlreadyUnlocked | RepositoryError::Conflict,
        )
        | EvaluationServiceError::PaymentReferenceMismatch { .. } => StatusCode::CONFLICT,
        EvaluationServiceError::PaymentNotSettled(_)
        | EvaluationServiceError::Payment(PaymentError::UnknownIntent(_)) => {
            StatusCode::PAYMENT_REQUIRED
        }
        EvaluationServiceError::Payment(
            PaymentError::Unavailable(_) | PaymentError::Rejected(_),
        ) => StatusCode::BAD_GATEWAY,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn error_response(error: EvaluationServiceError) -> Response {
    let status = status_for(&error);
    let payload = match error {
        EvaluationServiceError::Rejected(report) => json!({
            "error": "validation failed",
            "validation_errors": report.validation_errors,
            "anti_gaming_flags": report.anti_gaming_flags,
        }),
        other => json!({
            "error": other.to_string(),
        }),
    };
    (status, Json(payload)).into_response()
}
