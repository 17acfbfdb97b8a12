//! Quiz session state machine.
//!
//! ```text
//! Idle --start--> InProgress --last answer--> Completed --reset--> Idle
//!                     |
//!                     +--time limit exceeded--> Idle (nothing kept)
//! ```
//!
//! A session can also enter `Completed` directly by loading a shared result.
//! Time is passed in as [`Instant`]s captured at each event, so the session
//! never reads the clock itself.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use wire::{Centiseconds, ResultItem, MAX_ENTRY_INDEX, MAX_TOTAL_CENTISECONDS};

use crate::config::QuizConfig;
use crate::dataset::{Dataset, Field};
use crate::error::{QuizError, QuizResult};
use crate::i18n::{Language, Messages};
use crate::question::{QuestionSpec, QuestionType};
use crate::tiers::{PraiseTier, SpeedTier};

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InProgress => f.write_str("in progress"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Which time limit aborted a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// A single answer took longer than the per-question limit.
    Question,
    /// The whole quiz took longer than the total limit.
    Total,
}

/// The outcome of one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// Dataset position of the question's subject.
    pub source_index: usize,
    /// Question kind.
    pub question_type: QuestionType,
    /// Prompt in the current language.
    pub prompt: String,
    /// Correct answer in the current language.
    pub correct_answer: String,
    /// Chosen answer in the current language.
    pub user_answer: String,
    pub is_correct: bool,
    /// Time spent on the question.
    pub elapsed: Centiseconds,
    /// Entry the chosen text came from. Always `None` for correct answers.
    pub selected_index: Option<usize>,
    /// Field the chosen text came from. Always `None` for correct answers.
    pub selected_field: Option<Field>,
}

impl ResultRecord {
    /// Converts to a share-token item.
    #[must_use]
    pub fn to_item(&self) -> ResultItem {
        let entry_index = clamp_index(self.source_index);
        let type_code = self.question_type.code();
        if self.is_correct {
            ResultItem::correct(entry_index, type_code, self.elapsed)
        } else {
            ResultItem::incorrect(
                entry_index,
                type_code,
                self.selected_index.map(clamp_index),
                self.selected_field.map_or(0, Field::code),
                self.elapsed,
            )
        }
    }

    /// Re-resolves texts in `language` from the stored indices.
    ///
    /// Correctness is fixed when the record is made; a wrong answer whose
    /// source could not be recovered keeps its original text.
    pub fn relocalize(&mut self, dataset: &Dataset, messages: &Messages, language: Language) {
        if dataset.get(self.source_index).is_none() {
            return;
        }
        self.prompt = self
            .question_type
            .prompt(dataset, messages, language, self.source_index);
        self.correct_answer = dataset
            .value(self.source_index, self.question_type.answer_field(), language)
            .to_string();
        if self.is_correct {
            self.user_answer.clone_from(&self.correct_answer);
        } else if let (Some(index), Some(field)) = (self.selected_index, self.selected_field) {
            self.user_answer = dataset.value(index, field, language).to_string();
        }
    }
}

fn clamp_index(index: usize) -> u16 {
    u16::try_from(index).map_or(MAX_ENTRY_INDEX, |index| index.min(MAX_ENTRY_INDEX))
}

/// How the finished result can be passed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareAffordance {
    /// Share link token for a result played in this session.
    Share { token: String },
    /// The result came from someone else's link: invite to play instead.
    PlayYourself,
}

/// The frozen result of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub correct: usize,
    pub questions: usize,
    /// Total time, frozen on completion.
    pub total: Centiseconds,
    pub praise: PraiseTier,
    pub speed: SpeedTier,
    pub share: ShareAffordance,
    /// A shared token that lost items to truncation.
    pub truncated: bool,
}

impl ResultSummary {
    fn new(results: &[ResultRecord], total: Centiseconds, share: ShareAffordance) -> Self {
        let correct = results.iter().filter(|r| r.is_correct).count();
        Self {
            correct,
            questions: results.len(),
            total,
            praise: PraiseTier::for_score(correct),
            speed: SpeedTier::for_total(total),
            share,
            truncated: false,
        }
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Recorded; another question follows.
    Next { correct: bool },
    /// Recorded; that was the last question.
    Completed { correct: bool },
    /// A time limit was exceeded. The session is back to idle.
    TimedOut(TimeoutKind),
}

/// Result of polling the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Elapsed time since start.
    Running(Duration),
    /// The total limit was exceeded. The session is back to idle.
    TimedOut,
    /// Nothing is running.
    Stopped,
}

/// One player's quiz.
#[derive(Debug, Clone)]
pub struct Session {
    question_limit: Duration,
    total_limit: Duration,
    language: Language,
    phase: Phase,
    questions: Vec<QuestionSpec>,
    cursor: usize,
    results: Vec<ResultRecord>,
    started_at: Option<Instant>,
    last_answer_at: Option<Instant>,
    summary: Option<ResultSummary>,
}

impl Session {
    /// Creates an idle session.
    #[must_use]
    pub fn new(config: &QuizConfig, language: Language) -> Self {
        Self {
            question_limit: config.question_limit,
            total_limit: config.total_limit,
            language,
            phase: Phase::Idle,
            questions: Vec::new(),
            cursor: 0,
            results: Vec::new(),
            started_at: None,
            last_answer_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Returns `true` while the elapsed-time display should refresh.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.phase == Phase::InProgress
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    /// Zero-based position of the current question.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The question awaiting an answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        if self.phase == Phase::InProgress {
            self.questions.get(self.cursor)
        } else {
            None
        }
    }

    #[must_use]
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// The frozen result, once completed.
    #[must_use]
    pub const fn summary(&self) -> Option<&ResultSummary> {
        self.summary.as_ref()
    }

    /// Elapsed time at `now` while in progress; the frozen total once completed.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at, &self.summary) {
            (Phase::InProgress, Some(start), _) => now.saturating_duration_since(start),
            (Phase::Completed, _, Some(summary)) => {
                Duration::from_millis(u64::from(summary.total.raw()) * 10)
            }
            _ => Duration::ZERO,
        }
    }

    /// Starts a quiz with `questions` at `now`.
    pub fn start(&mut self, questions: Vec<QuestionSpec>, now: Instant) -> QuizResult<()> {
        if self.phase != Phase::Idle {
            return Err(QuizError::InvalidTransition {
                phase: self.phase,
                action: "start",
            });
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        tracing::debug!(questions = questions.len(), "session started");
        self.questions = questions;
        self.cursor = 0;
        self.results.clear();
        self.started_at = Some(now);
        self.last_answer_at = Some(now);
        self.summary = None;
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Polls the clock. Exceeding the total limit aborts the session.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let (Phase::InProgress, Some(start)) = (self.phase, self.started_at) else {
            return Tick::Stopped;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed > self.total_limit {
            self.time_out(TimeoutKind::Total, elapsed);
            return Tick::TimedOut;
        }
        Tick::Running(elapsed)
    }

    /// Submits the text of the chosen answer at `now`.
    pub fn answer(
        &mut self,
        dataset: &Dataset,
        choice: &str,
        now: Instant,
    ) -> QuizResult<AnswerOutcome> {
        let (Phase::InProgress, Some(start), Some(last)) =
            (self.phase, self.started_at, self.last_answer_at)
        else {
            return Err(QuizError::InvalidTransition {
                phase: self.phase,
                action: "answer",
            });
        };
        let Some(question) = self.questions.get(self.cursor) else {
            return Err(QuizError::InvalidTransition {
                phase: self.phase,
                action: "answer",
            });
        };

        let delta = now.saturating_duration_since(last);
        if delta > self.question_limit {
            self.time_out(TimeoutKind::Question, delta);
            return Ok(AnswerOutcome::TimedOut(TimeoutKind::Question));
        }
        let total = now.saturating_duration_since(start);
        if total > self.total_limit {
            self.time_out(TimeoutKind::Total, total);
            return Ok(AnswerOutcome::TimedOut(TimeoutKind::Total));
        }

        let correct = choice == question.correct_answer;
        let (selected_index, selected_field) = if correct {
            (None, None)
        } else {
            let field = question.question_type.answer_field();
            match recover_selection(dataset, question, choice, self.language) {
                Some((index, field)) => (Some(index), Some(field)),
                None => (None, Some(field)),
            }
        };
        self.results.push(ResultRecord {
            source_index: question.source_index,
            question_type: question.question_type,
            prompt: question.prompt.clone(),
            correct_answer: question.correct_answer.clone(),
            user_answer: choice.to_string(),
            is_correct: correct,
            elapsed: Centiseconds::from_duration(delta),
            selected_index,
            selected_field,
        });
        self.last_answer_at = Some(now);
        self.cursor += 1;

        if self.cursor < self.questions.len() {
            return Ok(AnswerOutcome::Next { correct });
        }
        self.complete(total)?;
        Ok(AnswerOutcome::Completed { correct })
    }

    /// Shows a result loaded from a share link.
    pub fn show_shared(
        &mut self,
        results: Vec<ResultRecord>,
        total: Centiseconds,
        truncated: bool,
    ) -> QuizResult<()> {
        if self.phase == Phase::InProgress {
            return Err(QuizError::InvalidTransition {
                phase: self.phase,
                action: "show a shared result",
            });
        }
        let total = total.saturate(MAX_TOTAL_CENTISECONDS);
        let mut summary = ResultSummary::new(&results, total, ShareAffordance::PlayYourself);
        summary.truncated = truncated;
        tracing::info!(
            correct = summary.correct,
            questions = summary.questions,
            total = %total,
            "shared result shown"
        );
        self.clear();
        self.results = results;
        self.summary = Some(summary);
        self.phase = Phase::Completed;
        Ok(())
    }

    /// Drops everything and returns to idle.
    pub fn reset(&mut self) {
        tracing::debug!(phase = %self.phase, "session reset");
        self.clear();
    }

    /// Switches the display language.
    ///
    /// Questions and results are re-resolved from their stored indices. A
    /// share token is re-emitted with the new language; the frozen total is
    /// kept as is.
    pub fn set_language(
        &mut self,
        dataset: &Dataset,
        messages: &Messages,
        language: Language,
    ) -> QuizResult<()> {
        self.language = language;
        for question in &mut self.questions {
            question.relocalize(dataset, messages, language);
        }
        for record in &mut self.results {
            record.relocalize(dataset, messages, language);
        }
        if let Some(summary) = &mut self.summary {
            if let ShareAffordance::Share { token } = &mut summary.share {
                *token = encode_results(&self.results, language, summary.total)?;
            }
        }
        Ok(())
    }

    fn complete(&mut self, total: Duration) -> QuizResult<()> {
        let total = Centiseconds::from_duration(total).saturate(MAX_TOTAL_CENTISECONDS);
        let token = encode_results(&self.results, self.language, total)?;
        let summary = ResultSummary::new(&self.results, total, ShareAffordance::Share { token });
        tracing::info!(
            correct = summary.correct,
            questions = summary.questions,
            total = %total,
            "quiz completed"
        );
        self.summary = Some(summary);
        self.started_at = None;
        self.last_answer_at = None;
        self.phase = Phase::Completed;
        Ok(())
    }

    fn time_out(&mut self, kind: TimeoutKind, elapsed: Duration) {
        tracing::warn!(
            ?kind,
            elapsed_ms = elapsed.as_millis() as u64,
            answered = self.results.len(),
            "time limit exceeded, session reset"
        );
        self.clear();
    }

    fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.questions.clear();
        self.cursor = 0;
        self.results.clear();
        self.started_at = None;
        self.last_answer_at = None;
        self.summary = None;
    }
}

/// Finds which entry and field the chosen text came from: first the
/// question's answer field, then every other field.
fn recover_selection(
    dataset: &Dataset,
    question: &QuestionSpec,
    choice: &str,
    language: Language,
) -> Option<(usize, Field)> {
    let primary = question.question_type.answer_field();
    if let Some(index) = question
        .choice_index(choice)
        .or_else(|| dataset.find_index(primary, choice, language))
    {
        return Some((index, primary));
    }
    Field::ALL
        .into_iter()
        .filter(|field| *field != primary)
        .find_map(|field| {
            dataset
                .find_index(field, choice, language)
                .map(|index| (index, field))
        })
}

/// Encodes results into a share token.
pub fn encode_results(
    results: &[ResultRecord],
    language: Language,
    total: Centiseconds,
) -> QuizResult<String> {
    let items: Vec<ResultItem> = results.iter().map(ResultRecord::to_item).collect();
    Ok(wire::encode_token(language.flag(), total, &items)?)
}
