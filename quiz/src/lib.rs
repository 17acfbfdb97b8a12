//! Quiz core for quizshare: datasets, question generation, sessions and
//! shareable results.
//!
//! This crate sits on top of [`wire`], which owns the share-token layout.
//! It turns a character dataset into multiple-choice quizzes, runs a timed
//! session over them, and turns the outcome into a share link (or a share
//! link back into a result view).
//!
//! # Design Principles
//!
//! - **Explicit state** - A [`Session`] value owns all mutable quiz state.
//! - **Caller-provided time and randomness** - Sessions take [`std::time::Instant`]s
//!   and generators take an [`rand::Rng`], so every path is testable.
//! - **Typed field access** - Entry fields are read through [`Field`] with a
//!   fixed language fallback order.
//! - **Local recovery** - Damaged or foreign share data degrades to fewer
//!   items or placeholders rather than failing.

mod cache;
mod config;
mod dataset;
mod error;
mod generator;
mod i18n;
mod links;
mod question;
mod session;
mod share;
mod tiers;

pub use cache::{count_label, CountCache};
pub use config::{QuizConfig, DEFAULT_PAGE_URL, DEFAULT_SHARE_INTENT_URL};
pub use dataset::{CharacterEntry, Dataset, Field, Localized};
pub use error::{QuizError, QuizResult};
pub use generator::{
    generate_questions, ExtraKind, QuestionGenerator, CHOICES, EXTRA_QUESTIONS,
    IDENTITY_QUESTIONS, QUIZ_LENGTH, VOICE_QUESTIONS,
};
pub use i18n::{Language, Messages, UnknownLanguage};
pub use links::{
    page_url, retry_url, share_intent_url, share_text, share_url, switch_language_url,
    LaunchMode, ENGLISH_FLAG, SHARE_PARAM,
};
pub use question::{Category, QuestionSpec, QuestionType};
pub use session::{
    encode_results, AnswerOutcome, Phase, ResultRecord, ResultSummary, Session,
    ShareAffordance, Tick, TimeoutKind,
};
pub use share::{
    load_shared, restore_results, switch_token_language, token_language, UNKNOWN_ANSWER,
};
pub use tiers::{PraiseTier, SpeedTier};
