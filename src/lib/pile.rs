//! Per-sample pileup data at a single locus.

use std::fmt;

/// One sample's bases and quality characters at one locus.
///
/// Before sanitization `bases` may still carry pileup marker syntax (`+2AC`, `^]`, `$`)
/// and can therefore be longer than `scores`. Once sanitized, both have the same length
/// and `scores[i]` is the quality of `bases[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pile {
    bases: Vec<u8>,
    scores: Vec<u8>,
}

impl Pile {
    /// Creates a pile from raw base and quality strings.
    #[must_use]
    pub fn new(bases: impl Into<Vec<u8>>, scores: impl Into<Vec<u8>>) -> Self {
        Self { bases: bases.into(), scores: scores.into() }
    }

    #[must_use]
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    #[must_use]
    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    /// Depth of the pile, measured by its quality string.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scores.len()
    }

    /// Number of bases equal to `base`, ignoring case.
    #[must_use]
    pub fn count_matches(&self, base: u8) -> usize {
        self.bases.iter().filter(|b| b.eq_ignore_ascii_case(&base)).count()
    }

    /// Returns a pile with the same scores and replaced bases.
    #[must_use]
    pub fn with_bases(&self, bases: Vec<u8>) -> Self {
        Self { bases, scores: self.scores.clone() }
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            String::from_utf8_lossy(&self.bases),
            String::from_utf8_lossy(&self.scores)
        )
    }
}
