use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use secrecy::ExposeSecret;
use serde_json::json;

use crate::api::ServerState;
use crate::error::JudgeError;

pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Error rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<JudgeError> for ApiError {
    fn from(err: JudgeError) -> Self {
        match err {
            JudgeError::InvalidRequest(msg) => bad_request(msg),
            JudgeError::NotFound(msg) => not_found(msg),
            JudgeError::AuthError(msg) => unauthorized(msg),
            other => internal_error(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

fn error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError {
        status,
        message: msg.into(),
    }
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    error(StatusCode::BAD_REQUEST, msg)
}

pub fn unauthorized(msg: impl Into<String>) -> ApiError {
    error(StatusCode::UNAUTHORIZED, msg)
}

pub fn not_found(msg: impl Into<String>) -> ApiError {
    error(StatusCode::NOT_FOUND, msg)
}

pub fn internal_error(msg: impl Into<String>) -> ApiError {
    error(StatusCode::INTERNAL_SERVER_ERROR, msg)
}

/// Checks the admin key header. Without a configured key every admin
/// request fails as a server error.
pub fn validate_admin(state: &ServerState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(key) = &state.admin_key else {
        log::error!("admin route called but no admin API key is configured");
        return Err(internal_error("Admin API key is not configured on the server"));
    };

    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthorized("Unauthorized"))?;

    if provided != key.expose_secret().as_str() {
        return Err(unauthorized("Unauthorized"));
    }
    Ok(())
}
