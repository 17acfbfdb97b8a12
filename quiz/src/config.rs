//! Quiz configuration.

use std::time::Duration;

use wire::{Limits, MAX_ITEM_CENTISECONDS, MAX_TOTAL_CENTISECONDS};

/// Canonical page that share and retry links point at.
pub const DEFAULT_PAGE_URL: &str = "https://quizshare.example/";

/// Endpoint that receives the share text as its `text` query parameter.
pub const DEFAULT_SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Tunables for question generation, sessions and sharing.
///
/// The time limits follow the widths of the share layout: a longer session
/// could not be represented in a token.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Longest time allowed on a single question.
    pub question_limit: Duration,

    /// Longest time allowed for the whole quiz.
    pub total_limit: Duration,

    /// Distractor draws per question before falling back to a full scan.
    pub max_distractor_attempts: usize,

    /// Probability that a distractor is drawn from the subject's own series.
    pub same_series_bias: f64,

    /// Placeholder entries at the end of the dataset that are not counted
    /// as characters.
    pub count_exclusions: usize,

    /// Canonical page URL.
    pub page_url: String,

    /// Share intent endpoint.
    pub share_intent_url: String,

    /// Decode limits for incoming share tokens.
    pub limits: Limits,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_limit: Duration::from_millis(u64::from(MAX_ITEM_CENTISECONDS) * 10),
            total_limit: Duration::from_millis(u64::from(MAX_TOTAL_CENTISECONDS) * 10),
            max_distractor_attempts: 200,
            same_series_bias: 0.7,
            count_exclusions: 2,
            page_url: DEFAULT_PAGE_URL.to_string(),
            share_intent_url: DEFAULT_SHARE_INTENT_URL.to_string(),
            limits: Limits::default(),
        }
    }
}

impl QuizConfig {
    /// Creates a config with small decode limits for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            limits: Limits::for_testing(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_layout() {
        let config = QuizConfig::default();
        assert_eq!(config.question_limit, Duration::from_millis(163_830));
        assert_eq!(config.total_limit, Duration::from_millis(655_350));
        assert_eq!(config.max_distractor_attempts, 200);
        assert_eq!(config.count_exclusions, 2);
    }

    #[test]
    fn for_testing_shrinks_decode_limits() {
        let config = QuizConfig::for_testing();
        assert_eq!(config.limits, Limits::for_testing());
        assert_eq!(config.question_limit, QuizConfig::default().question_limit);
    }
}
