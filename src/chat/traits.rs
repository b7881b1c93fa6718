use async_trait::async_trait;

use crate::error::JudgeError;

use super::message::ChatMessage;
use super::options::ChatOptions;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
}

/// Trait for providers that support chat-style interactions.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, JudgeError> {
        self.chat_with_options(messages, &ChatOptions::default())
            .await
    }

    async fn chat_with_options(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<Box<dyn ChatResponse>, JudgeError>;
}
