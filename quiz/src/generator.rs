//! Question generation.
//!
//! A quiz is 2 voice questions, 7 identity questions and 1 extra question
//! about a parent or a birthday. Subjects are taken from a shuffled walk of
//! the dataset so no entry is the subject of two questions.
//!
//! # Design Principles
//!
//! - **Injected randomness** - Every draw goes through the caller's [`Rng`].
//! - **Bounded work** - Distractor draws are capped, then fall back to a
//!   deterministic scan; a subject that still cannot fill 4 choices is skipped.
//! - **Short quizzes are valid** - A small dataset yields fewer questions.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::QuizConfig;
use crate::dataset::{Dataset, Field};
use crate::i18n::{Language, Messages};
use crate::question::{QuestionSpec, QuestionType};

/// Number of voice questions per quiz.
pub const VOICE_QUESTIONS: usize = 2;
/// Number of identity questions per quiz.
pub const IDENTITY_QUESTIONS: usize = 7;
/// Number of extra questions per quiz.
pub const EXTRA_QUESTIONS: usize = 1;
/// Full quiz length.
pub const QUIZ_LENGTH: usize = VOICE_QUESTIONS + IDENTITY_QUESTIONS + EXTRA_QUESTIONS;
/// Choices per question.
pub const CHOICES: usize = 4;

/// Kind of the extra question, chosen by a weighted roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    Father,
    Mother,
    BirthdayFromCivilian,
    BirthdayFromTransformed,
}

impl ExtraKind {
    /// Kinds with their weights, in roll order.
    pub const WEIGHTS: [(Self, f64); 4] = [
        (Self::Father, 0.3),
        (Self::Mother, 0.3),
        (Self::BirthdayFromCivilian, 0.2),
        (Self::BirthdayFromTransformed, 0.2),
    ];

    /// Maps a roll in `[0, 1)` to a kind by cumulative weight.
    ///
    /// Rolls outside the range land in the last bin.
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        let mut acc = 0.0;
        for (kind, weight) in Self::WEIGHTS {
            acc += weight;
            if roll < acc {
                return kind;
            }
        }
        Self::BirthdayFromTransformed
    }

    /// Question type asked for this kind.
    #[must_use]
    pub const fn question_type(self) -> QuestionType {
        match self {
            Self::Father => QuestionType::CivilianToFather,
            Self::Mother => QuestionType::CivilianToMother,
            Self::BirthdayFromCivilian => QuestionType::CivilianToBirthday,
            Self::BirthdayFromTransformed => QuestionType::TransformedToBirthday,
        }
    }
}

/// Builds quizzes from a dataset.
#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator<'a> {
    dataset: &'a Dataset,
    messages: &'a Messages,
    language: Language,
    config: &'a QuizConfig,
}

impl<'a> QuestionGenerator<'a> {
    /// Creates a generator resolving texts in `language`.
    #[must_use]
    pub const fn new(
        dataset: &'a Dataset,
        messages: &'a Messages,
        language: Language,
        config: &'a QuizConfig,
    ) -> Self {
        Self {
            dataset,
            messages,
            language,
            config,
        }
    }

    /// Generates a quiz in category order: voice, identity, extra.
    ///
    /// Returns fewer than [`QUIZ_LENGTH`] questions when the dataset runs out
    /// of usable subjects.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuestionSpec> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        order.shuffle(rng);
        let mut walk = order.into_iter();
        let mut used = HashSet::new();
        let mut questions = Vec::with_capacity(QUIZ_LENGTH);

        for (types, quota) in [
            (&QuestionType::VOICE[..], VOICE_QUESTIONS),
            (&QuestionType::IDENTITY[..], IDENTITY_QUESTIONS),
        ] {
            let mut made = 0;
            while made < quota {
                let Some(index) = walk.next() else { break };
                if used.contains(&index) {
                    continue;
                }
                let Some(&question_type) = types.choose(rng) else {
                    break;
                };
                if let Some(question) = self.build(question_type, index, rng) {
                    used.insert(index);
                    questions.push(question);
                    made += 1;
                }
            }
        }

        let kind = ExtraKind::from_roll(rng.gen::<f64>());
        let question_type = kind.question_type();
        for index in walk {
            if used.contains(&index) || !self.has(index, question_type.answer_field()) {
                continue;
            }
            if let Some(question) = self.build(question_type, index, rng) {
                questions.push(question);
                break;
            }
        }

        tracing::debug!(
            questions = questions.len(),
            extra = ?kind,
            language = %self.language,
            "quiz generated"
        );
        questions
    }

    /// Generates a quiz and shuffles its order.
    pub fn generate_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuestionSpec> {
        let mut questions = self.generate(rng);
        questions.shuffle(rng);
        questions
    }

    fn has(&self, index: usize, field: Field) -> bool {
        !self.dataset.value(index, field, self.language).is_empty()
    }

    /// Builds one question about `index`, or `None` if the subject lacks the
    /// needed fields or 4 distinct choices cannot be found.
    fn build<R: Rng + ?Sized>(
        &self,
        question_type: QuestionType,
        index: usize,
        rng: &mut R,
    ) -> Option<QuestionSpec> {
        let answer_field = question_type.answer_field();
        let answer = self.dataset.value(index, answer_field, self.language);
        if answer.is_empty() || !self.has(index, question_type.prompt_field()) {
            tracing::debug!(index, %question_type, "subject skipped: missing field");
            return None;
        }
        let subject = self.dataset.get(index)?;

        let (same, other): (Vec<usize>, Vec<usize>) = (0..self.dataset.len())
            .filter(|&i| self.has(i, answer_field))
            .partition(|&i| {
                self.dataset
                    .get(i)
                    .is_some_and(|entry| entry.same_series(subject))
            });

        let mut choices = vec![answer.to_string()];
        let mut attempts = 0;
        while choices.len() < CHOICES && attempts < self.config.max_distractor_attempts {
            attempts += 1;
            let pool = if rng.gen::<f64>() < self.config.same_series_bias && !same.is_empty() {
                &same
            } else {
                &other
            };
            let Some(&candidate) = pool.choose(rng) else {
                continue;
            };
            self.offer(question_type, index, candidate, &mut choices);
        }

        if choices.len() < CHOICES {
            for candidate in 0..self.dataset.len() {
                self.offer(question_type, index, candidate, &mut choices);
                if choices.len() >= CHOICES {
                    break;
                }
            }
        }

        if choices.len() < CHOICES {
            tracing::debug!(index, %question_type, found = choices.len(), "subject skipped: too few choices");
            return None;
        }

        choices.shuffle(rng);
        Some(QuestionSpec::new(
            self.dataset,
            self.messages,
            self.language,
            question_type,
            index,
            choices,
        ))
    }

    /// Adds the answer-field text of `candidate` if it is an acceptable
    /// distractor for the subject at `source`.
    fn offer(
        &self,
        question_type: QuestionType,
        source: usize,
        candidate: usize,
        choices: &mut Vec<String>,
    ) {
        let (prompt_field, answer_field) = (question_type.prompt_field(), question_type.answer_field());
        let text = self.dataset.value(candidate, answer_field, self.language);
        if text.is_empty() || choices.iter().any(|c| c == text) {
            return;
        }
        // Same prompt with a different answer is another form of the subject.
        if !question_type.category().is_extra()
            && self.dataset.value(candidate, prompt_field, self.language)
                == self.dataset.value(source, prompt_field, self.language)
            && text != self.dataset.value(source, answer_field, self.language)
        {
            return;
        }
        choices.push(text.to_string());
    }
}

/// Generates a shuffled quiz.
pub fn generate_questions<R: Rng + ?Sized>(
    dataset: &Dataset,
    messages: &Messages,
    language: Language,
    config: &QuizConfig,
    rng: &mut R,
) -> Vec<QuestionSpec> {
    QuestionGenerator::new(dataset, messages, language, config).generate_shuffled(rng)
}
