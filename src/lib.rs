//! Prompt evaluation service.
//!
//! A candidate prompt (or text) is compared with a baseline by an external
//! judge model. The judge's reply is parsed into scores and commentary,
//! stored, and aggregated into a per-user leaderboard.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use prompt_judge::builder::{Backend, GeneratorBuilder};
//! use prompt_judge::challenges::ChallengeCatalog;
//! use prompt_judge::evaluator::EvaluationService;
//! use prompt_judge::store::JsonFileStore;
//!
//! # async fn run() -> Result<(), prompt_judge::error::JudgeError> {
//! let generator = GeneratorBuilder::new()
//!     .backend(Backend::Groq)
//!     .api_key(std::env::var("GROQ_API_KEY").unwrap_or_default())
//!     .build()?;
//! let service = EvaluationService::new(
//!     Arc::from(generator),
//!     Arc::new(JsonFileStore::new("./evaluations")),
//!     Arc::new(ChallengeCatalog::predefined()),
//! );
//! let outcome = service
//!     .evaluate_challenge("challenge1", "Explica la relatividad con trenes", Some("ana"))
//!     .await?;
//! println!("{:?}", outcome.result.scores().map(|s| &s.score2));
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod builder;
pub mod challenges;
pub mod chat;
pub mod error;
pub mod evaluator;
pub mod ranking;
pub mod store;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
mod testing;

pub use chat::{ChatMessage, ChatOptions, ChatProvider, ChatResponse, ChatRole};
pub use error::JudgeError;
