//! Custom error types for pilecall operations.
//!
//! Errors fall into two classes. Configuration errors describe a problem with the
//! run itself (thresholds, sample grouping) and abort processing. Record errors
//! describe a single malformed pileup line; the caller rejects that line and moves on.

use thiserror::Error;

/// Result type alias for pilecall operations
pub type Result<T> = std::result::Result<T, PileupError>;

/// Error type for pilecall operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PileupError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Invalid frequency threshold
    #[error("Invalid frequency threshold: {value} (must be between {min} and {max})")]
    InvalidFrequency {
        /// The invalid frequency value
        value: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Invalid quality threshold
    #[error("Invalid quality threshold: {value} (must be between 0 and {max})")]
    InvalidQuality {
        /// The invalid quality value
        value: u8,
        /// Maximum valid value
        max: u8,
    },

    /// Quality offset that matches no known encoding
    #[error("Invalid quality offset: {offset} (must be 33 or 64)")]
    InvalidQualityOffset {
        /// The rejected offset
        offset: u8,
    },

    /// Sample grouping is not exactly two disjoint, non-empty groups
    #[error("Invalid sample grouping: {reason}")]
    InvalidGrouping {
        /// Explanation of the problem
        reason: String,
    },

    /// A configured sample index has no fields in a well-formed line
    #[error("Sample index {index} is not present in the input (line has {samples} samples)")]
    SampleOutOfRange {
        /// The configured sample index
        index: usize,
        /// Number of samples found in the line
        samples: usize,
    },

    /// A pileup line that cannot be interpreted
    #[error("Malformed pileup record: {reason}")]
    MalformedRecord {
        /// Explanation of the problem
        reason: String,
    },

    /// An indel marker was not followed by a single digit
    #[error("Invalid indel length '{found}' at position {position} of base string")]
    InvalidIndelLength {
        /// Character found where a digit was expected
        found: char,
        /// Zero-based position within the base string
        position: usize,
    },

    /// Bases and quality scores of a pile differ in length
    #[error("Pile has {bases} bases but {scores} quality scores")]
    LengthMismatch {
        /// Number of bases
        bases: usize,
        /// Number of quality scores
        scores: usize,
    },
}

impl PileupError {
    /// Returns true if this error concerns a single input record rather than the run
    /// configuration. Record errors lead to a rejected locus, everything else aborts.
    #[must_use]
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. } | Self::InvalidIndelLength { .. } | Self::LengthMismatch { .. }
        )
    }
}
