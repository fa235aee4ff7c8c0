//! Centralized validation and helper functions.

use std::str::FromStr;

/// Default number of sequence characters per FASTA line
pub const DEFAULT_CHARS_PER_LINE: usize = 70;

/// Default compression level used when writing compressed FASTA output
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 2;

/// Valid compression levels for gzip and bzip2 output
pub const MIN_COMPRESSION_LEVEL: u32 = 1;
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// A sequence must have at least this many symbols to be line-wrapped
pub const MIN_WRAP_LENGTH: usize = 2;

/// Configuration error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Number of characters per line must be a positive integer")]
    InvalidLineWidth,
    #[error("Sequence is too short to write: {0} characters (minimum {MIN_WRAP_LENGTH})")]
    SequenceTooShort(usize),
    #[error("Compression must be one of none, gzip or bzip2 (got '{0}')")]
    InvalidCompression(String),
    #[error(
        "Compression level must be in range {MIN_COMPRESSION_LEVEL}-{MAX_COMPRESSION_LEVEL} (got {0})"
    )]
    InvalidCompressionLevel(u32),
    #[error("One of a GenBank file or a FASTA file must be specified")]
    NoReferenceSource,
    #[error("Only one of a GenBank file or a FASTA file may be specified")]
    ConflictingReferenceSources,
}

/// Output compression applied to a written FASTA file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    /// File suffix appended to the requested output path
    #[must_use]
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some(".gz"),
            Self::Bzip2 => Some(".bz2"),
        }
    }
}

impl FromStr for Compression {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "bzip2" => Ok(Self::Bzip2),
            _ => Err(ValidationError::InvalidCompression(s.to_string())),
        }
    }
}

/// Check a line width, where `None` means the sequence is written on one line.
///
/// # Errors
///
/// Returns `ValidationError::InvalidLineWidth` for a width of zero.
pub fn validate_line_width(chars_per_line: Option<usize>) -> Result<(), ValidationError> {
    match chars_per_line {
        Some(0) => Err(ValidationError::InvalidLineWidth),
        _ => Ok(()),
    }
}

/// Check a gzip/bzip2 compression level.
///
/// # Errors
///
/// Returns `ValidationError::InvalidCompressionLevel` if the level is outside 1-9.
pub fn validate_compression_level(level: u32) -> Result<(), ValidationError> {
    if (MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCompressionLevel(level))
    }
}

/// Check that a sequence is long enough to be wrapped.
///
/// # Errors
///
/// Returns `ValidationError::SequenceTooShort` for sequences under two symbols.
pub fn validate_wrap_length(length: usize) -> Result<(), ValidationError> {
    if length < MIN_WRAP_LENGTH {
        Err(ValidationError::SequenceTooShort(length))
    } else {
        Ok(())
    }
}
