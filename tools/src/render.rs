//! Plain-text rendering of questions, results and decoded tokens.

use std::fmt::Write as _;

use quiz::{Messages, QuestionSpec, ResultRecord, ResultSummary};
use serde::Serialize;
use wire::{DecodedToken, ItemOutcome};

/// Renders a question with numbered choices.
#[must_use]
pub fn render_question(position: usize, count: usize, question: &QuestionSpec) -> String {
    let mut out = format!("[{}/{}] {}\n", position + 1, count, question.prompt);
    for (i, choice) in question.choices.iter().enumerate() {
        let _ = writeln!(out, "  {}) {choice}", i + 1);
    }
    out
}

/// Renders the result screen.
#[must_use]
pub fn render_results(
    messages: &Messages,
    results: &[ResultRecord],
    summary: &ResultSummary,
) -> String {
    let mut out = String::new();
    for (i, record) in results.iter().enumerate() {
        let n = (i + 1).to_string();
        let sec = record.elapsed.to_string();
        let _ = writeln!(out, "{}", messages.t("result_q_heading", &[("n", n.as_str())]));
        let _ = writeln!(out, "  {} => {}", record.prompt, record.user_answer);
        let time = messages.t("result_time", &[("sec", sec.as_str())]);
        if record.is_correct {
            let _ = writeln!(out, "  {} ({time})", messages.t("result_correct", &[]));
        } else {
            let _ = writeln!(
                out,
                "  {} ({time}) {}",
                messages.t("result_incorrect", &[]),
                messages.t(
                    "result_correct_answer",
                    &[("ans", record.correct_answer.as_str())]
                )
            );
        }
    }

    let correct = summary.correct.to_string();
    let questions = summary.questions.to_string();
    let sec = summary.total.to_string();
    let _ = writeln!(
        out,
        "{}",
        messages.t(
            "result_score_time",
            &[
                ("correct", correct.as_str()),
                ("total", questions.as_str()),
                ("sec", sec.as_str())
            ]
        )
    );
    let _ = writeln!(
        out,
        "{} {}",
        messages.t(summary.praise.message_key(), &[]),
        messages.t(summary.speed.message_key(), &[])
    );
    if summary.truncated {
        let _ = writeln!(out, "{}", messages.t("result_truncated", &[]));
    }
    out
}

/// JSON shape of the `decode` command.
#[derive(Debug, Serialize)]
pub struct DecodeOutput<'a> {
    pub token: &'a str,
    #[serde(flatten)]
    pub decoded: &'a DecodedToken,
    pub wrong: usize,
}

/// Renders a decoded token one item per line.
#[must_use]
pub fn format_decode_pretty(decoded: &DecodedToken) -> String {
    let header = decoded.header;
    let mut out = format!(
        "version: {} language: {:?} total: {}s items: {}{}\n",
        header.version,
        header.language,
        header.total,
        decoded.items.len(),
        if decoded.truncated { " (truncated)" } else { "" }
    );
    for (i, item) in decoded.items.iter().enumerate() {
        let _ = write!(
            out,
            "  #{i}: entry {} type {} {}s",
            item.entry_index, item.type_code, item.elapsed
        );
        match item.outcome {
            ItemOutcome::Correct => out.push_str(" correct\n"),
            ItemOutcome::Incorrect {
                selected_index,
                field_code,
            } => {
                let selected = selected_index.map_or_else(|| "?".to_string(), |i| i.to_string());
                let _ = writeln!(out, " wrong (picked entry {selected} field {field_code})");
            }
        }
    }
    out
}
