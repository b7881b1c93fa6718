use thiserror::Error;

/// Error types raised while evaluating prompts.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or missing input fields
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// A referenced entity (challenge, user) does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Errors returned by the text-generation provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

/// Converts reqwest HTTP errors into JudgeErrors
impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        JudgeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for JudgeError {
    fn from(err: serde_json::Error) -> Self {
        JudgeError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
