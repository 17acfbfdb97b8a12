//! Error types for quiz operations.

use std::fmt;
use std::io;

use crate::session::Phase;

/// Result type for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;

/// Errors that can occur while loading data, running a session or sharing.
#[derive(Debug)]
#[non_exhaustive]
pub enum QuizError {
    /// Share token could not be decoded.
    Wire(wire::DecodeError),

    /// Share token could not be encoded.
    Encode(wire::EncodeError),

    /// Character dataset is not valid JSON of the expected shape.
    Dataset(serde_json::Error),

    /// Localized string table is not a flat JSON object of strings.
    Messages(serde_json::Error),

    /// Filesystem access failed.
    Io(io::Error),

    /// A page or endpoint URL could not be parsed.
    InvalidUrl(url::ParseError),

    /// The operation is not valid in the current session phase.
    InvalidTransition { phase: Phase, action: &'static str },

    /// A session cannot start without questions.
    NoQuestions,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(err) => write!(f, "share token error: {err}"),
            Self::Encode(err) => write!(f, "share token encode error: {err}"),
            Self::Dataset(err) => write!(f, "invalid dataset: {err}"),
            Self::Messages(err) => write!(f, "invalid message table: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::InvalidUrl(err) => write!(f, "invalid url: {err}"),
            Self::InvalidTransition { phase, action } => {
                write!(f, "cannot {action} while {phase}")
            }
            Self::NoQuestions => write!(f, "no questions to play"),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Dataset(err) | Self::Messages(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidUrl(err) => Some(err),
            Self::InvalidTransition { .. } | Self::NoQuestions => None,
        }
    }
}

impl From<wire::DecodeError> for QuizError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for QuizError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<url::ParseError> for QuizError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_display_transition() {
        let err = QuizError::InvalidTransition {
            phase: Phase::Idle,
            action: "answer",
        };
        assert_eq!(err.to_string(), "cannot answer while idle");
        assert!(err.source().is_none());
    }

    #[test]
    fn wire_error_converts() {
        let err: QuizError = wire::DecodeError::UnsupportedVersion { found: 9 }.into();
        assert!(matches!(
            err,
            QuizError::Wire(wire::DecodeError::UnsupportedVersion { found: 9 })
        ));
        assert!(err.to_string().contains("version 9"));
        assert!(err.source().is_some());
    }

    #[test]
    fn dataset_error_keeps_source() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = QuizError::Dataset(json_err);
        assert!(err.to_string().starts_with("invalid dataset"));
        assert!(err.source().is_some());
    }

    #[test]
    fn no_questions_display() {
        assert_eq!(QuizError::NoQuestions.to_string(), "no questions to play");
    }
}
