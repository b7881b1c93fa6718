use crate::error::JudgeError;

/// Supported text-generation backends. All of them speak the
/// OpenAI-compatible chat-completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Groq,
    OpenAI,
    DeepSeek,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Groq => "Groq",
            Backend::OpenAI => "OpenAI",
            Backend::DeepSeek => "DeepSeek",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Backend::Groq => "https://api.groq.com/openai/v1",
            Backend::OpenAI => "https://api.openai.com/v1",
            Backend::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::Groq => "deepseek-r1-distill-llama-70b",
            Backend::OpenAI => "gpt-4.1-nano",
            Backend::DeepSeek => "deepseek-chat",
        }
    }

    /// Environment variable conventionally holding this backend's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Backend::Groq => "GROQ_API_KEY",
            Backend::OpenAI => "OPENAI_API_KEY",
            Backend::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = JudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(Backend::Groq),
            "openai" => Ok(Backend::OpenAI),
            "deepseek" => Ok(Backend::DeepSeek),
            _ => Err(JudgeError::InvalidRequest(format!(
                "Unknown generation backend: {s}"
            ))),
        }
    }
}
