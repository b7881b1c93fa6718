use serde::Deserialize;

use super::{DEFAULT_CHALLENGE_TEMPERATURE, DEFAULT_CUSTOM_TEMPERATURE, DEFAULT_MAX_TOKENS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub backend: String,
    pub api_key: Option<String>,
    /// Environment variable holding the key. Defaults to the backend's own.
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub timeout_seconds: Option<u64>,
    pub custom_temperature: f32,
    pub challenge_temperature: f32,
    pub focus_filter: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: "groq".to_string(),
            api_key: None,
            api_key_env: None,
            base_url: None,
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: None,
            custom_temperature: DEFAULT_CUSTOM_TEMPERATURE,
            challenge_temperature: DEFAULT_CHALLENGE_TEMPERATURE,
            focus_filter: true,
        }
    }
}
