//! Praise and speed tiers shown on the result screen.

use serde::Serialize;
use wire::Centiseconds;

/// Praise for the number of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PraiseTier {
    Perfect,
    VeryGood,
    Good,
    Close,
    Finish,
}

impl PraiseTier {
    /// Tier for `correct` answers: 10, 7+, 4+, 1+, 0.
    #[must_use]
    pub const fn for_score(correct: usize) -> Self {
        match correct {
            0 => Self::Finish,
            1..=3 => Self::Close,
            4..=6 => Self::Good,
            7..=9 => Self::VeryGood,
            _ => Self::Perfect,
        }
    }

    /// Message key of the praise text.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Perfect => "praise_perfect",
            Self::VeryGood => "praise_very_good",
            Self::Good => "praise_good",
            Self::Close => "praise_close",
            Self::Finish => "praise_finish",
        }
    }
}

/// Comment on the total time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    VeryFast,
    Fast,
    Ok,
    Think,
}

impl SpeedTier {
    /// Tier for a total time: under 15 s, under 30 s, under 60 s, or slower.
    #[must_use]
    pub const fn for_total(total: Centiseconds) -> Self {
        match total.raw() {
            0..=1_499 => Self::VeryFast,
            1_500..=2_999 => Self::Fast,
            3_000..=5_999 => Self::Ok,
            _ => Self::Think,
        }
    }

    /// Message key of the speed text.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::VeryFast => "speed_very_fast",
            Self::Fast => "speed_fast",
            Self::Ok => "speed_ok",
            Self::Think => "speed_think",
        }
    }
}
