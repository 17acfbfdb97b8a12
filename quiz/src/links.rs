//! Launch, share and retry URLs.
//!
//! A page URL carries at most one piece of state in its query:
//!
//! - `?r=<token>` opens a shared result; the token carries the language.
//! - `?en` opens normal play in English. No query means Japanese.

use url::Url;
use wire::Limits;

use crate::error::QuizResult;
use crate::i18n::{Language, Messages};
use crate::session::ResultSummary;
use crate::share::{switch_token_language, token_language};

/// Query key carrying a share token.
pub const SHARE_PARAM: &str = "r";

/// Query key selecting English for normal play.
pub const ENGLISH_FLAG: &str = "en";

/// What a page load should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Start screen for a new quiz.
    Play { language: Language },
    /// Someone's shared result.
    Shared { token: String, language: Language },
}

impl LaunchMode {
    /// Reads the launch mode from a page URL.
    ///
    /// A shared result takes its language from the token. If the token
    /// cannot be decoded the `en` flag decides, and restoring is left to fail
    /// later.
    #[must_use]
    pub fn from_url(url: &Url, limits: &Limits) -> Self {
        let flag_language = if has_english_flag(url) {
            Language::En
        } else {
            Language::Ja
        };
        match share_param(url) {
            Some(token) => {
                let language = token_language(&token, limits).unwrap_or(flag_language);
                Self::Shared { token, language }
            }
            None => Self::Play {
                language: flag_language,
            },
        }
    }

    /// Initial display language.
    #[must_use]
    pub const fn language(&self) -> Language {
        match self {
            Self::Play { language } | Self::Shared { language, .. } => *language,
        }
    }
}

fn share_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == SHARE_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn has_english_flag(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| key == ENGLISH_FLAG)
}

/// The page URL without query or fragment.
#[must_use]
pub fn page_url(url: &Url) -> Url {
    let mut page = url.clone();
    page.set_query(None);
    page.set_fragment(None);
    page
}

fn with_language_flag(page: &Url, language: Language) -> Url {
    let mut url = page_url(page);
    if language == Language::En {
        url.set_query(Some(ENGLISH_FLAG));
    }
    url
}

/// Link that opens `token` as a shared result.
#[must_use]
pub fn share_url(page: &Url, token: &str) -> Url {
    let mut url = page_url(page);
    url.query_pairs_mut().append_pair(SHARE_PARAM, token);
    url
}

/// Link back to a fresh quiz in `language`.
#[must_use]
pub fn retry_url(page: &Url, language: Language) -> Url {
    with_language_flag(page, language)
}

/// The URL to show after switching the language on `current`.
///
/// A shared token is re-emitted with the new language. An undecodable token
/// falls back to the plain language flag.
#[must_use]
pub fn switch_language_url(current: &Url, language: Language, limits: &Limits) -> Url {
    let Some(token) = share_param(current) else {
        return with_language_flag(current, language);
    };
    match switch_token_language(&token, language, limits) {
        Ok(token) => share_url(current, &token),
        Err(err) => {
            tracing::warn!(%err, "share token not switched, falling back to language flag");
            with_language_flag(current, language)
        }
    }
}

/// Text posted with a shared result.
#[must_use]
pub fn share_text(messages: &Messages, summary: &ResultSummary, share_url: &Url) -> String {
    let correct = summary.correct.to_string();
    let total = summary.questions.to_string();
    let time = summary.total.to_string();
    let body = messages.t(
        "tweet_result",
        &[
            ("correct", correct.as_str()),
            ("total", total.as_str()),
            ("time", time.as_str()),
        ],
    );
    format!(
        "{body} {} {} {share_url}",
        messages.t(summary.praise.message_key(), &[]),
        messages.t(summary.speed.message_key(), &[])
    )
}

/// Share intent link carrying `text`.
pub fn share_intent_url(endpoint: &str, text: &str) -> QuizResult<Url> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("text", text);
    Ok(url)
}
