use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::challenges::Challenge;
use crate::evaluator::EvaluationResult;

/// A persisted evaluation: the envelope returned to the caller plus the
/// context it was produced in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(flatten)]
    pub result: EvaluationResult,
    /// Display name, when it differs from the user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_details: Option<Challenge>,
}

impl EvaluationRecord {
    pub fn new(result: EvaluationResult, challenge_details: Option<Challenge>) -> Self {
        Self {
            id: Uuid::new_v4(),
            result,
            username: None,
            challenge_details,
        }
    }

    /// Name shown on the leaderboard.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.result.user_id)
    }
}
