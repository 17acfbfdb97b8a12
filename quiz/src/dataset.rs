//! Character dataset model and typed field access.
//!
//! The dataset is a JSON array of character entries. Every text field is
//! either a plain string or a map from language code to string:
//!
//! ```json
//! { "civilian": { "ja": "星野 ひかり", "en": "Hikari Hoshino" }, "series": "Star" }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};
use crate::i18n::Language;

/// A text value that may vary by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Localized {
    /// Same text in every language.
    Plain(String),
    /// Text keyed by language code.
    ByLanguage(BTreeMap<String, String>),
}

impl Localized {
    /// Resolves the text for `language`, falling back to `ja`, then `en`,
    /// then the empty string.
    #[must_use]
    pub fn resolve(&self, language: Language) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::ByLanguage(map) => [language.code(), Language::Ja.code(), Language::En.code()]
                .iter()
                .find_map(|code| map.get(*code))
                .map_or("", String::as_str),
        }
    }
}

impl From<&str> for Localized {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

/// Attribute of a character entry that questions can ask about.
///
/// The discriminant is the field code carried in share tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Field {
    Civilian = 1,
    Transformed = 2,
    Voice = 3,
    Father = 4,
    Mother = 5,
    Birthday = 6,
}

impl Field {
    /// Every field in code order.
    pub const ALL: [Self; 6] = [
        Self::Civilian,
        Self::Transformed,
        Self::Voice,
        Self::Father,
        Self::Mother,
        Self::Birthday,
    ];

    /// Returns the wire code (1..=6).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a wire code back to a field. Codes 0 and 7 carry no field.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Civilian),
            2 => Some(Self::Transformed),
            3 => Some(Self::Voice),
            4 => Some(Self::Father),
            5 => Some(Self::Mother),
            6 => Some(Self::Birthday),
            _ => None,
        }
    }

    /// Returns the JSON key for this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Civilian => "civilian",
            Self::Transformed => "transformed",
            Self::Voice => "voice",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::Birthday => "birthday",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One character record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    #[serde(default)]
    pub civilian: Option<Localized>,
    #[serde(default)]
    pub transformed: Option<Localized>,
    #[serde(default)]
    pub voice: Option<Localized>,
    #[serde(default)]
    pub father: Option<Localized>,
    #[serde(default)]
    pub mother: Option<Localized>,
    #[serde(default)]
    pub birthday: Option<Localized>,
    /// Series the character belongs to. Distractors prefer the same series.
    #[serde(default)]
    pub series: Option<Localized>,
}

impl CharacterEntry {
    /// Returns the raw value of `field`, if present.
    #[must_use]
    pub const fn field(&self, field: Field) -> Option<&Localized> {
        match field {
            Field::Civilian => self.civilian.as_ref(),
            Field::Transformed => self.transformed.as_ref(),
            Field::Voice => self.voice.as_ref(),
            Field::Father => self.father.as_ref(),
            Field::Mother => self.mother.as_ref(),
            Field::Birthday => self.birthday.as_ref(),
        }
    }

    /// Resolves `field` for `language`. Missing fields resolve to `""`.
    #[must_use]
    pub fn value(&self, field: Field, language: Language) -> &str {
        self.field(field)
            .map_or("", |localized| localized.resolve(language))
    }

    /// Returns `true` if `field` resolves to a non-empty string.
    #[must_use]
    pub fn has(&self, field: Field, language: Language) -> bool {
        !self.value(field, language).is_empty()
    }

    /// Returns `true` if both entries belong to the same series.
    #[must_use]
    pub fn same_series(&self, other: &Self) -> bool {
        self.series == other.series
    }
}

/// An ordered, immutable collection of character entries.
///
/// Entry positions are stable identifiers: share tokens refer to entries
/// by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<CharacterEntry>,
}

impl Dataset {
    /// Wraps an entry list.
    #[must_use]
    pub const fn new(entries: Vec<CharacterEntry>) -> Self {
        Self { entries }
    }

    /// Parses a JSON array of entries.
    pub fn from_json(json: &str) -> QuizResult<Self> {
        let entries: Vec<CharacterEntry> =
            serde_json::from_str(json).map_err(QuizError::Dataset)?;
        tracing::debug!(entries = entries.len(), "dataset loaded");
        Ok(Self::new(entries))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CharacterEntry> {
        self.entries.get(index)
    }

    /// Returns all entries in order.
    #[must_use]
    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    /// Resolves `field` of the entry at `index`. Out-of-range indices
    /// resolve to `""`.
    #[must_use]
    pub fn value(&self, index: usize, field: Field, language: Language) -> &str {
        self.get(index)
            .map_or("", |entry| entry.value(field, language))
    }

    /// Returns the first entry whose `field` resolves to `text`.
    ///
    /// Empty text never matches.
    #[must_use]
    pub fn find_index(&self, field: Field, text: &str, language: Language) -> Option<usize> {
        if text.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.value(field, language) == text)
    }

    /// Number of characters shown to players: the entry count minus
    /// `exclusions` placeholder entries, or `None` if that is not positive.
    #[must_use]
    pub fn display_count(&self, exclusions: usize) -> Option<usize> {
        self.len().checked_sub(exclusions).filter(|count| *count > 0)
    }
}

impl From<Vec<CharacterEntry>> for Dataset {
    fn from(entries: Vec<CharacterEntry>) -> Self {
        Self::new(entries)
    }
}
