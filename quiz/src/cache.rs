//! Cached character count for the start screen.
//!
//! The count is shown before the dataset has loaded, so it is kept in a
//! small local file holding one decimal integer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::QuizResult;
use crate::i18n::Messages;

/// File-backed cache of the displayed character count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountCache {
    path: PathBuf,
}

impl CountCache {
    /// Creates a cache stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached count. Missing or corrupt files read as unknown.
    #[must_use]
    pub fn load(&self) -> Option<usize> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), %err, "count cache unreadable");
                }
                return None;
            }
        };
        match text.trim().parse::<usize>() {
            Ok(count) if count > 0 => Some(count),
            _ => {
                tracing::debug!(path = %self.path.display(), "count cache corrupt");
                None
            }
        }
    }

    /// Writes `count`. Zero is not written.
    pub fn store(&self, count: usize) -> QuizResult<()> {
        if count == 0 {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, count.to_string())?;
        Ok(())
    }

    /// Stores the display count of `dataset` and returns it.
    pub fn refresh(&self, dataset: &Dataset, exclusions: usize) -> QuizResult<Option<usize>> {
        let count = dataset.display_count(exclusions);
        if let Some(count) = count {
            self.store(count)?;
            tracing::debug!(count, "count cache refreshed");
        }
        Ok(count)
    }
}

/// Start-screen label for `count`.
#[must_use]
pub fn count_label(messages: &Messages, count: Option<usize>) -> String {
    match count {
        Some(n) => messages.t("precure_count_value", &[("n", n.to_string().as_str())]),
        None => messages.t("precure_count_unknown", &[]),
    }
}
