use serde::{Deserialize, Serialize};

/// Criteria arrive either as one string or as a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Criteria {
    One(String),
    Many(Vec<String>),
}

impl Criteria {
    pub fn joined(&self) -> String {
        match self {
            Criteria::One(text) => text.clone(),
            Criteria::Many(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateTextsRequest {
    pub original_text: Option<String>,
    pub modified_text: Option<String>,
    pub criteria: Option<Criteria>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateChallengeRequest {
    pub challenge_id: Option<String>,
    pub user_prompt: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQuery {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
