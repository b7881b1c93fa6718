use secrecy::{ExposeSecret, SecretString};

use crate::backends::openai_compatible::OpenAICompatible;
use crate::chat::ChatProvider;
use crate::error::JudgeError;

use super::backend::Backend;

/// Builder for configuring and instantiating the text-generation client.
#[derive(Default)]
pub struct GeneratorBuilder {
    backend: Backend,
    api_key: Option<SecretString>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    system: Option<String>,
    timeout_seconds: Option<u64>,
}

impl GeneratorBuilder {
    /// Creates a new builder targeting the default backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend provider to use.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Sets an already wrapped API key.
    pub fn api_key_secret(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the default maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the default sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the system prompt/context.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Builds the client. Fails when no usable API key was provided.
    pub fn build(self) -> Result<Box<dyn ChatProvider>, JudgeError> {
        let api_key = self
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                JudgeError::InvalidRequest(format!(
                    "No API key provided for {}",
                    self.backend.name()
                ))
            })?;

        log::debug!(
            "Building generation client. backend={:?} model={:?} max_tokens={:?} timeout={:?}",
            self.backend,
            self.model,
            self.max_tokens,
            self.timeout_seconds,
        );

        let provider = OpenAICompatible::new(
            self.backend,
            api_key,
            self.base_url,
            self.model,
            self.max_tokens,
            self.temperature,
            self.timeout_seconds,
            self.system,
        )?;
        Ok(Box::new(provider))
    }
}
