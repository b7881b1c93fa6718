use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use super::helpers::{internal_error, validate_admin, ApiResult};
use crate::api::types::AdminListQuery;
use crate::api::ServerState;
use crate::store::EvaluationRecord;

const DEFAULT_LIMIT: usize = 100;

pub async fn list_evaluations(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<AdminListQuery>,
) -> ApiResult<Json<Vec<EvaluationRecord>>> {
    validate_admin(&state, &headers)?;
    let mut records = load_all(&state).await?;
    records.truncate(query.limit.unwrap_or(DEFAULT_LIMIT));
    Ok(Json(records))
}

pub async fn download_evaluations(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    validate_admin(&state, &headers)?;
    let records = load_all(&state).await?;
    let body = serde_json::to_string_pretty(&records)
        .map_err(|err| internal_error(err.to_string()))?;
    let disposition = format!(
        "attachment; filename=\"evaluations-{}.json\"",
        Utc::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn load_all(state: &ServerState) -> ApiResult<Vec<EvaluationRecord>> {
    state.service.store().list_all().await.map_err(|err| {
        log::error!("could not read evaluations: {err}");
        internal_error(err.to_string())
    })
}
