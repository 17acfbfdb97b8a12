//! Loading datasets and message tables from disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quiz::{Dataset, Language, Messages};

/// Reads and parses a character dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let json =
        fs::read_to_string(path).with_context(|| format!("read dataset {}", path.display()))?;
    Dataset::from_json(&json).with_context(|| format!("parse dataset {}", path.display()))
}

/// Path of the message table for `language` inside `dir`.
#[must_use]
pub fn messages_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}.json", language.code()))
}

/// Reads and parses the message table for `language`.
pub fn load_messages(dir: &Path, language: Language) -> Result<Messages> {
    let path = messages_path(dir, language);
    let json =
        fs::read_to_string(&path).with_context(|| format!("read messages {}", path.display()))?;
    Messages::from_json(&json).with_context(|| format!("parse messages {}", path.display()))
}

/// Message tables for both languages, loaded on first use.
#[derive(Debug)]
pub struct MessageStore {
    dir: PathBuf,
    ja: Option<Messages>,
    en: Option<Messages>,
}

impl MessageStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ja: None,
            en: None,
        }
    }

    /// Returns the table for `language`, loading it if needed.
    pub fn get(&mut self, language: Language) -> Result<&Messages> {
        let slot = match language {
            Language::Ja => &mut self.ja,
            Language::En => &mut self.en,
        };
        if slot.is_none() {
            *slot = Some(load_messages(&self.dir, language)?);
        }
        slot.as_ref()
            .with_context(|| format!("messages for {language} not loaded"))
    }
}
