use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::helpers::{internal_error, ApiResult};
use crate::api::types::{MessageResponse, RankingQuery};
use crate::api::ServerState;
use crate::ranking::{aggregate, RankingEntry};
use crate::store::EvaluationRecord;

pub async fn ranking(
    State(state): State<ServerState>,
    Query(query): Query<RankingQuery>,
) -> ApiResult<Json<Vec<RankingEntry>>> {
    let records = state.service.store().list_all().await.map_err(|err| {
        log::error!("could not read evaluations for ranking: {err}");
        internal_error("Could not load ranking")
    })?;
    Ok(Json(aggregate(&records, query.username.as_deref())))
}

pub async fn user_evaluations(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<EvaluationRecord>>> {
    let records = state
        .service
        .store()
        .list_by_user(&user_id)
        .await
        .map_err(|err| internal_error(err.to_string()))?;
    Ok(Json(records))
}

pub async fn challenges(State(state): State<ServerState>) -> Response {
    Json(state.service.challenges().public_list()).into_response()
}

pub async fn liveness() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is running".to_string(),
    })
}
