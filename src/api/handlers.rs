#[path = "handlers/helpers.rs"]
mod helpers;

#[path = "handlers/evaluate.rs"]
mod evaluate;

#[path = "handlers/queries.rs"]
mod queries;

#[path = "handlers/admin.rs"]
mod admin;

pub use admin::{download_evaluations, list_evaluations};
pub use evaluate::{evaluate_challenge, evaluate_texts};
pub use helpers::{
    bad_request, internal_error, not_found, unauthorized, ApiError, ApiResult, ADMIN_KEY_HEADER,
};
pub use queries::{challenges, liveness, ranking, user_evaluations};
