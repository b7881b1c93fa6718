//! Test doubles shared by unit tests across the crate.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatOptions, ChatProvider, ChatResponse};
use crate::error::JudgeError;
use crate::store::{EvaluationRecord, EvaluationStore, StoreError};

pub type CallLog = Arc<Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>>;

/// Provider that answers every call with the same reply or failure.
pub struct ScriptedProvider {
    reply: Result<String, String>,
    calls: CallLog,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: CallLog::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: CallLog::default(),
        }
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[derive(Debug)]
struct ScriptedReply(String);

impl fmt::Display for ScriptedReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ChatResponse for ScriptedReply {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat_with_options(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<Box<dyn ChatResponse>, JudgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));
        match &self.reply {
            Ok(text) => Ok(Box::new(ScriptedReply(text.clone()))),
            Err(message) => Err(JudgeError::ProviderError(message.clone())),
        }
    }
}

/// Store whose writes always fail and whose reads are empty.
pub struct FailingStore;

#[async_trait]
impl EvaluationStore for FailingStore {
    async fn append(&self, _record: &EvaluationRecord) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )))
    }

    async fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError> {
        Ok(Vec::new())
    }
}
