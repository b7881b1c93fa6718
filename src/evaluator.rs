//! Judge-backed comparison of a baseline and a candidate text.
//!
//! The service builds the instruction, calls the generator, turns the reply
//! into a [`StructuredEvaluation`] and appends the outcome to the store.

#[path = "evaluator/types.rs"]
mod types;

#[path = "evaluator/prompt.rs"]
mod prompt;

#[path = "evaluator/parser.rs"]
mod parser;

#[path = "evaluator/focus.rs"]
mod focus;

#[path = "evaluator/service.rs"]
mod service;

pub use focus::{split_sentences, FocusFilter, FocusTerms, PROMPT_TERMS, TEXT_TERMS};
pub use parser::{
    build_structured, format_score, parse_sections, ParsedSections, NO_CONCLUSION,
    NO_JUSTIFICATION, NO_RECOMMENDATIONS,
};
pub use prompt::{build_comparison_prompt, Subject};
pub use service::{
    EvaluationOutcome, EvaluationService, EvaluationSettings, PersistOutcome,
    TextEvaluationRequest,
};
pub use types::{
    normalize_user_id, Evaluation, EvaluationResult, StructuredEvaluation, ANONYMOUS_USER,
    CUSTOM_CHALLENGE_ID,
};
