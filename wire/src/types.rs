//! Core types for the share layout.

use std::fmt;

/// A duration in hundredths of a second.
///
/// This is the only time unit that crosses the wire. Conversions from
/// floating-point seconds round to the nearest centisecond and floor
/// negative inputs at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centiseconds(u32);

impl Centiseconds {
    /// Creates a value from raw centiseconds.
    #[must_use]
    pub const fn new(cs: u32) -> Self {
        Self(cs)
    }

    /// Returns the raw centisecond count.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Rounds `secs` to the nearest centisecond.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self(0);
        }
        let cs = (secs * 100.0).round();
        if cs >= f64::from(u32::MAX) {
            Self(u32::MAX)
        } else {
            Self(cs as u32)
        }
    }

    /// Converts a [`std::time::Duration`], rounding to the nearest centisecond.
    #[must_use]
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self::from_secs_f64(duration.as_secs_f64())
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Returns the value clamped to `max`.
    #[must_use]
    pub const fn saturate(self, max: u32) -> Self {
        if self.0 > max {
            Self(max)
        } else {
            self
        }
    }
}

impl From<u32> for Centiseconds {
    fn from(cs: u32) -> Self {
        Self(cs)
    }
}

impl From<Centiseconds> for u32 {
    fn from(cs: Centiseconds) -> Self {
        cs.0
    }
}

/// Formats as seconds with two decimals, e.g. `12.34`.
impl fmt::Display for Centiseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Which of the two supported languages the result was shared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LanguageFlag {
    /// Language bit 0.
    #[default]
    Primary,
    /// Language bit 1.
    Secondary,
}

impl LanguageFlag {
    /// Creates the flag from its wire bit.
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Secondary
        } else {
            Self::Primary
        }
    }

    /// Returns the wire bit.
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn centiseconds_round_to_nearest() {
        assert_eq!(Centiseconds::from_secs_f64(1.004).raw(), 100);
        assert_eq!(Centiseconds::from_secs_f64(1.005_1).raw(), 101);
        assert_eq!(Centiseconds::from_secs_f64(163.83).raw(), 16383);
    }

    #[test]
    fn centiseconds_floor_negative_and_nan() {
        assert_eq!(Centiseconds::from_secs_f64(-3.0).raw(), 0);
        assert_eq!(Centiseconds::from_secs_f64(f64::NAN).raw(), 0);
    }

    #[test]
    fn centiseconds_from_duration() {
        let cs = Centiseconds::from_duration(Duration::from_millis(10_000));
        assert_eq!(cs.raw(), 1000);
        assert!((cs.as_secs_f64() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn centiseconds_saturate() {
        assert_eq!(Centiseconds::new(70_000).saturate(65_535).raw(), 65_535);
        assert_eq!(Centiseconds::new(12).saturate(65_535).raw(), 12);
    }

    #[test]
    fn centiseconds_display() {
        assert_eq!(Centiseconds::new(1000).to_string(), "10.00");
        assert_eq!(Centiseconds::new(16383).to_string(), "163.83");
        assert_eq!(Centiseconds::new(7).to_string(), "0.07");
    }

    #[test]
    fn language_flag_bit_roundtrip() {
        assert_eq!(LanguageFlag::from_bit(true), LanguageFlag::Secondary);
        assert!(!LanguageFlag::Primary.bit());
        assert_eq!(LanguageFlag::default(), LanguageFlag::Primary);
    }
}
