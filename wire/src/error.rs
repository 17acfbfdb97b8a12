//! Error types for share-token operations.

use std::fmt;

/// Result type for token decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a share token.
///
/// A short item list is not an error: decoding stops at the first incomplete
/// record and reports it through [`DecodedToken::truncated`](crate::DecodedToken::truncated).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Version byte is neither the legacy nor the current format.
    UnsupportedVersion { found: u8 },

    /// Token ended before the header was complete.
    TruncatedHeader {
        available_bits: usize,
        required_bits: usize,
    },

    /// Token contains a character outside the URL-safe base64 alphabet.
    InvalidBase64 { position: usize },

    /// Token is longer than the configured limit.
    TokenTooLong { limit: usize, actual: usize },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The pre-sized buffer disagreed with the computed layout.
    Bitstream(bitstream::BitError),
}

impl DecodeError {
    /// Returns `true` for the "cannot restore this result" condition.
    #[must_use]
    pub const fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported share format: version {found}")
            }
            Self::TruncatedHeader {
                available_bits,
                required_bits,
            } => {
                write!(
                    f,
                    "truncated header: {available_bits} bits, need {required_bits}"
                )
            }
            Self::InvalidBase64 { position } => {
                write!(f, "invalid base64 character at position {position}")
            }
            Self::TokenTooLong { limit, actual } => {
                write!(f, "token length limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(err) => write!(f, "bitstream error: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

impl From<bitstream::BitError> for EncodeError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}
