//! Reasons a pileup record is rejected instead of producing a report row.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consensus::NoCallReason;

/// Why a locus was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RejectionReason {
    /// A sample's declared depth was below the nominal minimum
    InsufficientNominalDepth,
    /// A pile was below the minimum depth after quality filtering
    InsufficientFilteredDepth,
    /// No consensus base could be called
    NoConsensus,
    /// The record could not be parsed
    MalformedRecord,
}

impl RejectionReason {
    /// All reasons, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::InsufficientNominalDepth,
        Self::InsufficientFilteredDepth,
        Self::NoConsensus,
        Self::MalformedRecord,
    ];

    /// Returns a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InsufficientNominalDepth => "Sample depth below the minimum nominal depth",
            Self::InsufficientFilteredDepth => "Pile depth below the minimum after quality filtering",
            Self::NoConsensus => "No consensus base could be called",
            Self::MalformedRecord => "Malformed pileup record",
        }
    }

    /// Short identifier used in the rejects file.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::InsufficientNominalDepth => "insufficient_nominal_depth",
            Self::InsufficientFilteredDepth => "insufficient_filtered_depth",
            Self::NoConsensus => "no_consensus",
            Self::MalformedRecord => "malformed_record",
        }
    }
}

impl From<NoCallReason> for RejectionReason {
    fn from(reason: NoCallReason) -> Self {
        match reason {
            NoCallReason::InsufficientDepth => Self::InsufficientFilteredDepth,
            NoCallReason::NoCoverage | NoCallReason::LowBaseFrequency => Self::NoConsensus,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use pilecall_lib::rejection::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
