use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// User id recorded when a request does not name one. Never ranked.
pub const ANONYMOUS_USER: &str = "anonymous_user";

/// Challenge id recorded for evaluations of caller-supplied texts.
pub const CUSTOM_CHALLENGE_ID: &str = "custom";

/// Structured fields extracted from a judge reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredEvaluation {
    /// Baseline score, two decimals in [0.00, 100.00].
    #[serde(deserialize_with = "string_or_number")]
    pub score1: String,
    /// Candidate score, two decimals in [0.00, 100.00].
    #[serde(deserialize_with = "string_or_number")]
    pub score2: String,
    pub justification: String,
    pub conclusion: String,
    pub recommendations: String,
    /// Unmodified reply, kept for auditing.
    pub raw_response: String,
}

/// Payload of an evaluation envelope.
///
/// On the wire `RawText` is a bare string and `Structured` an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evaluation {
    Structured(StructuredEvaluation),
    RawText(String),
}

impl Evaluation {
    pub fn as_structured(&self) -> Option<&StructuredEvaluation> {
        match self {
            Evaluation::Structured(structured) => Some(structured),
            Evaluation::RawText(_) => None,
        }
    }

    /// Candidate score as a number.
    ///
    /// Raw-text payloads are scanned for the candidate score label; anything
    /// unreadable counts as zero.
    pub fn candidate_score(&self) -> f64 {
        match self {
            Evaluation::Structured(structured) => {
                structured.score2.trim().parse().unwrap_or(0.0)
            }
            Evaluation::RawText(text) => super::parser::parse_sections(text)
                .candidate_score
                .unwrap_or(0.0),
        }
    }
}

/// Evaluation envelope returned to callers and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub evaluation: Evaluation,
    pub user_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "custom_challenge_id")]
    pub challenge_id: String,
}

impl EvaluationResult {
    pub fn structured(
        user_id: impl Into<String>,
        challenge_id: impl Into<String>,
        evaluation: StructuredEvaluation,
    ) -> Self {
        Self {
            evaluation: Evaluation::Structured(evaluation),
            user_id: user_id.into(),
            success: true,
            error: None,
            timestamp: Utc::now(),
            challenge_id: challenge_id.into(),
        }
    }

    /// Envelope for a failed evaluation: a generic message for display plus
    /// the underlying error.
    pub fn failure(
        user_id: impl Into<String>,
        challenge_id: impl Into<String>,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self {
            evaluation: Evaluation::RawText(message.into()),
            user_id: user_id.into(),
            success: false,
            error: Some(if error.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                error
            }),
            timestamp: Utc::now(),
            challenge_id: challenge_id.into(),
        }
    }

    /// Structured fields, only when the evaluation succeeded.
    pub fn scores(&self) -> Option<&StructuredEvaluation> {
        if self.success {
            self.evaluation.as_structured()
        } else {
            None
        }
    }
}

/// Falls back to the anonymous user for missing or blank ids.
pub fn normalize_user_id(user_id: Option<&str>) -> String {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ANONYMOUS_USER.to_string(),
    }
}

fn custom_challenge_id() -> String {
    CUSTOM_CHALLENGE_ID.to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(value) => format!("{value:.2}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StructuredEvaluation {
        StructuredEvaluation {
            score1: "40.00".into(),
            score2: "85.50".into(),
            justification: "j".into(),
            conclusion: "c".into(),
            recommendations: "r".into(),
            raw_response: "raw".into(),
        }
    }

    #[test]
    fn structured_envelope_serializes_as_object() {
        let result = EvaluationResult::structured("ana", CUSTOM_CHALLENGE_ID, sample());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["userId"], "ana");
        assert_eq!(json["evaluation"]["score2"], "85.50");
        assert_eq!(json["evaluation"]["rawResponse"], "raw");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_envelope_serializes_as_string_and_hides_scores() {
        let result = EvaluationResult::failure("ana", "challenge1", "try again", "timeout");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["evaluation"], "try again");
        assert_eq!(json["error"], "timeout");
        assert!(result.scores().is_none());
    }

    #[test]
    fn failure_error_is_never_empty() {
        let result = EvaluationResult::failure("ana", "custom", "try again", "");
        assert_eq!(result.error.as_deref(), Some("Unknown error"));
    }

    #[test]
    fn numeric_scores_are_accepted_when_reading() {
        let value = json!({
            "evaluation": {
                "score1": 12,
                "score2": 87.5,
                "justification": "j",
                "conclusion": "c",
                "recommendations": "r",
                "rawResponse": "raw"
            },
            "userId": "ana",
            "success": true,
            "timestamp": "2025-03-01T10:00:00.000Z"
        });
        let result: EvaluationResult = serde_json::from_value(value).unwrap();
        let structured = result.scores().unwrap();
        assert_eq!(structured.score1, "12.00");
        assert_eq!(structured.score2, "87.50");
        assert_eq!(result.challenge_id, CUSTOM_CHALLENGE_ID);
    }

    #[test]
    fn candidate_score_reads_legacy_raw_text() {
        let evaluation = Evaluation::RawText(
            "PUNTUACIÓN TEXTO 1: 30.00\nPUNTUACIÓN TEXTO 2: 72.25\nJUSTIFICACIÓN: ok".into(),
        );
        assert_eq!(evaluation.candidate_score(), 72.25);
        assert_eq!(Evaluation::RawText("nada".into()).candidate_score(), 0.0);
    }

    #[test]
    fn blank_user_ids_become_anonymous() {
        assert_eq!(normalize_user_id(None), ANONYMOUS_USER);
        assert_eq!(normalize_user_id(Some("  ")), ANONYMOUS_USER);
        assert_eq!(normalize_user_id(Some(" ana ")), "ana");
    }
}
