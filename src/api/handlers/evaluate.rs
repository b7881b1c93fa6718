use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::helpers::ApiResult;
use crate::api::types::{EvaluateChallengeRequest, EvaluateTextsRequest};
use crate::api::ServerState;
use crate::evaluator::{EvaluationOutcome, EvaluationResult, TextEvaluationRequest};

type EnvelopeResponse = (StatusCode, Json<EvaluationResult>);

pub async fn evaluate_texts(
    State(state): State<ServerState>,
    body: Result<Json<EvaluateTextsRequest>, JsonRejection>,
) -> ApiResult<EnvelopeResponse> {
    let Json(req) = body?;
    let request = TextEvaluationRequest {
        baseline: req.original_text.unwrap_or_default(),
        candidate: req.modified_text.unwrap_or_default(),
        criteria: req.criteria.map(|c| c.joined()).unwrap_or_default(),
        user_id: req.user_id,
    };
    let outcome = state.service.evaluate_texts(&request).await?;
    Ok(envelope(outcome))
}

pub async fn evaluate_challenge(
    State(state): State<ServerState>,
    body: Result<Json<EvaluateChallengeRequest>, JsonRejection>,
) -> ApiResult<EnvelopeResponse> {
    let Json(req) = body?;
    let outcome = state
        .service
        .evaluate_challenge(
            req.challenge_id.as_deref().unwrap_or_default(),
            req.user_prompt.as_deref().unwrap_or_default(),
            req.user_id.as_deref(),
        )
        .await?;
    Ok(envelope(outcome))
}

fn envelope(outcome: EvaluationOutcome) -> EnvelopeResponse {
    let status = if outcome.result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome.result))
}
