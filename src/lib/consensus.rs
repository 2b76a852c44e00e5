//! Majority-vote consensus base calling across piles.
//!
//! The caller pools the bases of every pile at a locus, counts `A`, `C`, `G` and `T`
//! case-insensitively, and calls the most frequent one if it makes up a large enough
//! fraction of all observations. Other symbols (`N`, `*`, ...) add to the denominator only.
//!
//! Ties between bases are broken by the fixed priority `A > C > G > T`, so repeated calls
//! on the same input always give the same answer.

use std::fmt;

/// Bases that can be called, in tie-break priority order.
pub const CALLABLE_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Why no consensus base was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoCallReason {
    /// At least one pile was shallower than the minimum depth of coverage
    InsufficientDepth,
    /// All piles were empty
    NoCoverage,
    /// The most frequent base did not reach the minimum base frequency
    LowBaseFrequency,
}

impl NoCallReason {
    /// Returns a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InsufficientDepth => "A pile was below the minimum depth of coverage",
            Self::NoCoverage => "No bases were observed",
            Self::LowBaseFrequency => "No base reached the minimum base frequency",
        }
    }
}

impl fmt::Display for NoCallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Outcome of consensus calling at one locus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusCall {
    /// The called base, always uppercase
    Called(u8),
    /// No base could be called
    NoCall(NoCallReason),
}


/// Calls a consensus base from a set of allele strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusCaller {
    min_depth_of_coverage: usize,
    min_base_frequency: f64,
}

impl ConsensusCaller {
    /// Creates a caller.
    ///
    /// # Arguments
    /// * `min_depth_of_coverage` - Every allele string must be at least this long
    /// * `min_base_frequency` - Fraction of all observations the winning base must reach
    #[must_use]
    pub fn new(min_depth_of_coverage: usize, min_base_frequency: f64) -> Self {
        Self { min_depth_of_coverage, min_base_frequency }
    }

    #[must_use]
    pub fn min_depth_of_coverage(&self) -> usize {
        self.min_depth_of_coverage
    }

    #[must_use]
    pub fn min_base_frequency(&self) -> f64 {
        self.min_base_frequency
    }

    /// Calls the consensus base across `piles`.
    ///
    /// A single pile shorter than the minimum depth of coverage vetoes the call.
    ///
    /// # Examples
    /// ```
    /// use pilecall_lib::consensus::{ConsensusCall, ConsensusCaller};
    ///
    /// let caller = ConsensusCaller::new(5, 0.9);
    /// let piles: [&[u8]; 2] = [b"AAAAAAAAAAAAAAACA", b"AAAAAAAAAAAAAAAAAAA"];
    /// assert_eq!(caller.call(&piles), ConsensusCall::Called(b'A'));
    /// ```
    #[must_use]
    pub fn call<B: AsRef<[u8]>>(&self, piles: &[B]) -> ConsensusCall {
        let mut counts = [0usize; 4];
        let mut total_length = 0usize;

        for pile in piles {
            let pile = pile.as_ref();
            if pile.len() < self.min_depth_of_coverage {
                return ConsensusCall::NoCall(NoCallReason::InsufficientDepth);
            }
            total_length += pile.len();
            for base in pile {
                if let Some(index) = base_index(*base) {
                    counts[index] += 1;
                }
            }
        }

        if total_length == 0 {
            return ConsensusCall::NoCall(NoCallReason::NoCoverage);
        }

        // First maximum wins, which implements the A > C > G > T priority
        let mut winner = 0;
        for index in 1..counts.len() {
            if counts[index] > counts[winner] {
                winner = index;
            }
        }

        let frequency = counts[winner] as f64 / total_length as f64;
        if frequency >= self.min_base_frequency {
            ConsensusCall::Called(CALLABLE_BASES[winner])
        } else {
            ConsensusCall::NoCall(NoCallReason::LowBaseFrequency)
        }
    }
}

#[inline]
fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}
