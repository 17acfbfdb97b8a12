//! Display languages and the localized string table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use wire::LanguageFlag;

use crate::error::{QuizError, QuizResult};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese, the primary language.
    #[default]
    Ja,
    /// English.
    En,
}

impl Language {
    /// Returns the language code used in datasets and URLs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Returns the share-token language bit for this language.
    #[must_use]
    pub const fn flag(self) -> LanguageFlag {
        match self {
            Self::Ja => LanguageFlag::Primary,
            Self::En => LanguageFlag::Secondary,
        }
    }

    /// Maps a share-token language bit to a language.
    #[must_use]
    pub const fn from_flag(flag: LanguageFlag) -> Self {
        match flag {
            LanguageFlag::Primary => Self::Ja,
            LanguageFlag::Secondary => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// `{{name}}` placeholder in a message template.
const PLACEHOLDER_PATTERN: &str = r"\{\{(\w+)\}\}";

/// Compiled once from a literal; `placeholder_pattern_compiles` pins it.
fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// A flat table of localized message templates.
///
/// Templates contain `{{name}}` placeholders filled at lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    table: HashMap<String, String>,
}

impl Messages {
    /// Parses a flat JSON object of strings.
    pub fn from_json(json: &str) -> QuizResult<Self> {
        let table: HashMap<String, String> =
            serde_json::from_str(json).map_err(QuizError::Messages)?;
        Ok(Self { table })
    }

    /// Builds a table from key/template pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            table: pairs
                .into_iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the raw template for `key`.
    #[must_use]
    pub fn template(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// Renders `key` with `vars`.
    ///
    /// A missing key renders as `""`; a placeholder without a matching
    /// variable renders as `""`.
    #[must_use]
    pub fn t(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let Some(template) = self.template(key) else {
            return String::new();
        };
        placeholder()
            .replace_all(template, |caps: &Captures<'_>| {
                vars.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map_or("", |(_, value)| *value)
                    .to_string()
            })
            .into_owned()
    }
}
