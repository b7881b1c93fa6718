use std::sync::Arc;

use crate::challenges::{Challenge, ChallengeCatalog};
use crate::chat::{ChatMessage, ChatOptions, ChatProvider};
use crate::error::JudgeError;
use crate::store::{EvaluationRecord, EvaluationStore};

use super::focus::FocusFilter;
use super::parser::build_structured;
use super::prompt::{build_comparison_prompt, Subject};
use super::types::{normalize_user_id, EvaluationResult, CUSTOM_CHALLENGE_ID};

/// Sampling and post-processing knobs for judge calls.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSettings {
    pub custom_temperature: f32,
    pub challenge_temperature: f32,
    pub max_tokens: u32,
    pub apply_focus_filter: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            custom_temperature: 0.1,
            challenge_temperature: 0.8,
            max_tokens: 1500,
            apply_focus_filter: true,
        }
    }
}

/// Two caller-supplied texts to compare.
#[derive(Debug, Clone, Default)]
pub struct TextEvaluationRequest {
    pub baseline: String,
    pub candidate: String,
    pub criteria: String,
    pub user_id: Option<String>,
}

/// What happened to the record after the evaluation was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub result: EvaluationResult,
    pub persisted: PersistOutcome,
}

struct Job<'a> {
    subject: Subject,
    challenge_id: &'a str,
    challenge: Option<&'a Challenge>,
    criteria: &'a str,
    baseline: &'a str,
    candidate: &'a str,
    user_id: String,
    temperature: f32,
}

/// Runs comparisons through the judge model and records every outcome.
pub struct EvaluationService {
    generator: Arc<dyn ChatProvider>,
    store: Arc<dyn EvaluationStore>,
    challenges: Arc<ChallengeCatalog>,
    settings: EvaluationSettings,
}

impl EvaluationService {
    pub fn new(
        generator: Arc<dyn ChatProvider>,
        store: Arc<dyn EvaluationStore>,
        challenges: Arc<ChallengeCatalog>,
    ) -> Self {
        Self {
            generator,
            store,
            challenges,
            settings: EvaluationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: EvaluationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn EvaluationStore> {
        &self.store
    }

    pub fn challenges(&self) -> &Arc<ChallengeCatalog> {
        &self.challenges
    }

    /// Compares two free-form texts against the given criteria.
    ///
    /// Missing inputs are rejected before the judge is called. A judge
    /// failure is not an error here: it yields an unsuccessful envelope.
    pub async fn evaluate_texts(
        &self,
        request: &TextEvaluationRequest,
    ) -> Result<EvaluationOutcome, JudgeError> {
        require(&request.baseline, "originalText")?;
        require(&request.candidate, "modifiedText")?;
        require(&request.criteria, "criteria")?;

        Ok(self
            .run(Job {
                subject: Subject::Texts,
                challenge_id: CUSTOM_CHALLENGE_ID,
                challenge: None,
                criteria: &request.criteria,
                baseline: &request.baseline,
                candidate: &request.candidate,
                user_id: normalize_user_id(request.user_id.as_deref()),
                temperature: self.settings.custom_temperature,
            })
            .await)
    }

    /// Compares a user's prompt with the base prompt of a predefined challenge.
    pub async fn evaluate_challenge(
        &self,
        challenge_id: &str,
        candidate: &str,
        user_id: Option<&str>,
    ) -> Result<EvaluationOutcome, JudgeError> {
        require(challenge_id, "challengeId")?;
        require(candidate, "userPrompt")?;
        let challenge = self
            .challenges
            .get(challenge_id)
            .ok_or_else(|| JudgeError::NotFound(format!("Challenge not found: {challenge_id}")))?;

        Ok(self
            .run(Job {
                subject: Subject::Prompts,
                challenge_id: &challenge.id,
                challenge: Some(challenge),
                criteria: &challenge.criteria,
                baseline: &challenge.base_prompt,
                candidate,
                user_id: normalize_user_id(user_id),
                temperature: self.settings.challenge_temperature,
            })
            .await)
    }

    /// Calls the judge, parses the reply and stores the result.
    ///
    /// The store write is awaited before returning, so a slow store delays the
    /// response. Its outcome is reported beside the result and never alters it.
    async fn run(&self, job: Job<'_>) -> EvaluationOutcome {
        let prompt = build_comparison_prompt(job.subject, job.criteria, job.baseline, job.candidate);
        let options = ChatOptions::new()
            .temperature(job.temperature)
            .max_tokens(self.settings.max_tokens);

        log::info!(
            "evaluating {} for user {} ({:?})",
            job.challenge_id,
            job.user_id,
            job.subject
        );

        let result = match self.ask(&prompt, &options).await {
            Ok(reply) => {
                let focus = self.settings.apply_focus_filter.then(|| match job.subject {
                    Subject::Prompts => FocusFilter::prompts(),
                    Subject::Texts => FocusFilter::texts(),
                });
                EvaluationResult::structured(
                    job.user_id,
                    job.challenge_id,
                    build_structured(&reply, focus),
                )
            }
            Err(err) => {
                log::error!("evaluation of {} failed: {err}", job.challenge_id);
                EvaluationResult::failure(
                    job.user_id,
                    job.challenge_id,
                    job.subject.failure_message(),
                    err.to_string(),
                )
            }
        };

        let record = EvaluationRecord::new(result, job.challenge.cloned());
        let persisted = match self.store.append(&record).await {
            Ok(()) => PersistOutcome::Stored,
            Err(err) => {
                log::warn!("could not store evaluation {}: {err}", record.id);
                PersistOutcome::Failed(err.to_string())
            }
        };

        EvaluationOutcome {
            result: record.result,
            persisted,
        }
    }

    async fn ask(&self, prompt: &str, options: &ChatOptions) -> Result<String, JudgeError> {
        let response = self
            .generator
            .chat_with_options(&[ChatMessage::user().content(prompt).build()], options)
            .await?;
        // an absent reply parses like an empty one
        Ok(response.text().unwrap_or_default())
    }
}

fn require(value: &str, field: &str) -> Result<(), JudgeError> {
    if value.trim().is_empty() {
        return Err(JudgeError::InvalidRequest(format!("Missing required field: {field}")));
    }
    Ok(())
}
