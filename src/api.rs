//! HTTP surface of the service.

#[path = "api/types.rs"]
mod types;

#[path = "api/handlers.rs"]
mod handlers;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::routing::{any, get, post};
use axum::Router;
use secrecy::SecretString;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::evaluator::EvaluationService;

pub use handlers::{ApiError, ApiResult, ADMIN_KEY_HEADER};
pub use types::{
    AdminListQuery, Criteria, EvaluateChallengeRequest, EvaluateTextsRequest, MessageResponse,
    RankingQuery,
};

/// State shared by all handlers.
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<EvaluationService>,
    pub admin_key: Option<Arc<SecretString>>,
}

impl ServerState {
    pub fn new(service: Arc<EvaluationService>, admin_key: Option<SecretString>) -> Self {
        Self {
            service,
            admin_key: admin_key.map(Arc::new),
        }
    }
}

/// Builds the application router. When `static_dir` is given, non-API paths
/// are served from it and unknown paths fall back to its `index.html`.
pub fn router(state: ServerState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/test", get(handlers::liveness))
        .route("/api/challenges", get(handlers::challenges))
        .route("/api/ranking", get(handlers::ranking))
        .route("/api/evaluate", post(handlers::evaluate_texts))
        .route("/api/evaluate/challenge", post(handlers::evaluate_challenge))
        .route("/api/evaluations/user/:user_id", get(handlers::user_evaluations))
        .route("/api/admin/evaluations", get(handlers::list_evaluations))
        .route(
            "/api/admin/evaluations/download",
            get(handlers::download_evaluations),
        )
        .route("/api", any(api_not_found))
        .route("/api/*rest", any(api_not_found))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            api.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api.fallback(route_not_found),
    };

    app.layer(CorsLayer::permissive())
}

/// Binds `addr` and serves `app` until the process is stopped.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn api_not_found() -> ApiError {
    handlers::not_found("API endpoint not found")
}

async fn route_not_found() -> ApiError {
    handlers::not_found("Route not found")
}
