//! Share header layout and constants.

use bitstream::{BitReader, BitWriter};

use crate::error::{DecodeError, EncodeError, WireResult};
use crate::types::{Centiseconds, LanguageFlag};

/// Legacy format version: no language bit.
pub const LEGACY_VERSION: u8 = 6;

/// Current format version: adds the language bit.
pub const VERSION: u8 = 7;

/// Width of the version field.
pub const VERSION_BITS: u8 = 8;

/// Width of the language field (current version only).
pub const LANGUAGE_BITS: u8 = 1;

/// Width of the total elapsed time field.
pub const TOTAL_TIME_BITS: u8 = 16;

/// Largest representable total time (655.35 s).
pub const MAX_TOTAL_CENTISECONDS: u32 = (1 << TOTAL_TIME_BITS) - 1;

/// Header size in bits for the current version.
pub const HEADER_BITS: usize = header_bits(VERSION);

/// Returns the header size in bits for `version`.
///
/// Unknown versions report the current layout.
#[must_use]
pub const fn header_bits(version: u8) -> usize {
    let base = VERSION_BITS as usize + TOTAL_TIME_BITS as usize;
    if version == LEGACY_VERSION {
        base
    } else {
        base + LANGUAGE_BITS as usize
    }
}

/// Share header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShareHeader {
    /// Format version the token was written with.
    pub version: u8,
    /// Language the result was shared in (always primary for legacy tokens).
    pub language: LanguageFlag,
    /// Total elapsed time, clamped to [`MAX_TOTAL_CENTISECONDS`].
    pub total: Centiseconds,
}

impl ShareHeader {
    /// Creates a header for the current version.
    #[must_use]
    pub const fn new(language: LanguageFlag, total: Centiseconds) -> Self {
        Self {
            version: VERSION,
            language,
            total: total.saturate(MAX_TOTAL_CENTISECONDS),
        }
    }

    /// Returns `true` if the token predates the language bit.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        self.version == LEGACY_VERSION
    }
}

/// Writes a current-version header.
pub(crate) fn write_header(
    writer: &mut BitWriter<'_>,
    language: LanguageFlag,
    total: Centiseconds,
) -> Result<(), EncodeError> {
    writer.write_bits(u64::from(VERSION), VERSION_BITS)?;
    writer.write_bit(language.bit())?;
    writer.write_bits(
        u64::from(total.saturate(MAX_TOTAL_CENTISECONDS).raw()),
        TOTAL_TIME_BITS,
    )?;
    Ok(())
}

/// Reads a header of either known version.
pub(crate) fn read_header(reader: &mut BitReader<'_>) -> WireResult<ShareHeader> {
    let truncated = |reader: &BitReader<'_>, required_bits: usize| DecodeError::TruncatedHeader {
        available_bits: reader.bit_position() + reader.bits_remaining(),
        required_bits,
    };

    let version = reader
        .read_bits(VERSION_BITS)
        .map_err(|_| truncated(reader, HEADER_BITS))? as u8;
    let language = match version {
        LEGACY_VERSION => LanguageFlag::Primary,
        VERSION => LanguageFlag::from_bit(
            reader
                .read_bit()
                .map_err(|_| truncated(reader, HEADER_BITS))?,
        ),
        found => return Err(DecodeError::UnsupportedVersion { found }),
    };
    let total = reader
        .read_bits(TOTAL_TIME_BITS)
        .map_err(|_| truncated(reader, header_bits(version)))?;

    Ok(ShareHeader {
        version,
        language,
        total: Centiseconds::new(total as u32),
    })
}
