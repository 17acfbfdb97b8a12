//! Configurable limits for bounded decoding.

/// Limits enforced while decoding share tokens.
///
/// Tokens arrive in URLs from untrusted sources; these bound the work a
/// single decode can do.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum token length in characters. Longer tokens are rejected.
    pub max_token_chars: usize,

    /// Maximum number of items decoded. Further items are ignored and the
    /// result is marked truncated.
    pub max_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // A full quiz is 25 + 10 * 42 bits, well under 100 characters.
            max_token_chars: 4096,
            max_items: 64,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_token_chars: 256,
            max_items: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_token_chars: usize::MAX,
            max_items: usize::MAX,
        }
    }
}
