//! Restoring shared results and switching a token's language.

use wire::{DecodedToken, Limits};

use crate::dataset::{Dataset, Field};
use crate::error::QuizResult;
use crate::i18n::{Language, Messages};
use crate::question::QuestionType;
use crate::session::{ResultRecord, Session};

/// Shown in place of a wrong answer whose source cannot be resolved.
pub const UNKNOWN_ANSWER: &str = "(?)";

/// Rebuilds result records from a decoded token.
///
/// Correct answers are resolved from the current dataset. Items that refer
/// to a missing entry or an unknown question type are dropped.
#[must_use]
pub fn restore_results(
    dataset: &Dataset,
    messages: &Messages,
    language: Language,
    decoded: &DecodedToken,
) -> Vec<ResultRecord> {
    let mut results = Vec::with_capacity(decoded.items.len());
    for item in &decoded.items {
        let source_index = usize::from(item.entry_index);
        let Some(question_type) = QuestionType::from_code(item.type_code) else {
            tracing::warn!(
                type_code = item.type_code,
                "shared item dropped: unknown question type"
            );
            continue;
        };
        if dataset.get(source_index).is_none() {
            tracing::warn!(
                entry = source_index,
                entries = dataset.len(),
                "shared item dropped: entry out of range"
            );
            continue;
        }

        let correct_answer = dataset
            .value(source_index, question_type.answer_field(), language)
            .to_string();
        let (user_answer, selected_index, selected_field) = if item.is_wrong() {
            let field = Field::from_code(item.field_code());
            let index = item
                .selected_index()
                .map(usize::from)
                .filter(|index| dataset.get(*index).is_some());
            match (index, field) {
                (Some(index), Some(field)) => (
                    dataset.value(index, field, language).to_string(),
                    Some(index),
                    Some(field),
                ),
                _ => (UNKNOWN_ANSWER.to_string(), None, field),
            }
        } else {
            (correct_answer.clone(), None, None)
        };

        let is_correct = user_answer == correct_answer;
        results.push(ResultRecord {
            source_index,
            question_type,
            prompt: question_type.prompt(dataset, messages, language, source_index),
            correct_answer,
            user_answer,
            is_correct,
            elapsed: item.elapsed,
            selected_index: selected_index.filter(|_| !is_correct),
            selected_field: selected_field.filter(|_| !is_correct),
        });
    }
    results
}

/// Decodes `token` and shows it in `session` as a shared result.
///
/// Returns the decoded token so callers can inspect the header.
pub fn load_shared(
    session: &mut Session,
    dataset: &Dataset,
    messages: &Messages,
    token: &str,
    limits: &Limits,
) -> QuizResult<DecodedToken> {
    let decoded = wire::decode_token(token, limits)?;
    if decoded.truncated {
        tracing::warn!(
            items = decoded.items.len(),
            "shared token truncated, showing complete items"
        );
    }
    let results = restore_results(dataset, messages, session.language(), &decoded);
    session.show_shared(results, decoded.header.total, decoded.truncated)?;
    Ok(decoded)
}

/// Language recorded in a share token.
pub fn token_language(token: &str, limits: &Limits) -> QuizResult<Language> {
    let decoded = wire::decode_token(token, limits)?;
    Ok(Language::from_flag(decoded.header.language))
}

/// Re-emits `token` with the language bit for `language`.
pub fn switch_token_language(
    token: &str,
    language: Language,
    limits: &Limits,
) -> QuizResult<String> {
    let decoded = wire::decode_token(token, limits)?;
    Ok(wire::reencode_with_language(&decoded, language.flag())?)
}
