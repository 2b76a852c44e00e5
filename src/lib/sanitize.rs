//! Removal of pileup marker syntax from per-sample base strings.
//!
//! A pileup base string interleaves the observed alleles with annotations:
//!
//! - `+N` / `-N` followed by `N` bases: an insertion or deletion after this position
//! - `^` followed by one mapping-quality character: the start of a read
//! - `$`: the end of a read (consumes the following character as well)
//!
//! [`PileSanitizer`] strips the annotations so that exactly one allele character remains
//! per entry in the quality string. Indel lengths are read as a single decimal digit, so
//! indels longer than nine bases are not decoded correctly.

use crate::errors::{PileupError, Result};
use crate::pile::Pile;

/// Scanner state while walking a base string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Emitting allele characters.
    Normal,
    /// Just saw `+` or `-`; the next character is the indel length.
    AwaitingIndelLength,
    /// Dropping this many more characters.
    Skipping(u8),
}

/// Decodes annotated pileup base strings into clean allele strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PileSanitizer;

impl PileSanitizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the allele characters of `bases` with all marker syntax removed.
    ///
    /// Input without marker characters is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::InvalidIndelLength`] when `+` or `-` is not followed by a digit.
    ///
    /// # Examples
    /// ```
    /// use pilecall_lib::sanitize::PileSanitizer;
    ///
    /// let sanitizer = PileSanitizer::new();
    /// assert_eq!(sanitizer.sanitize(b"AAAA+3CCCGG").unwrap(), b"AAAAGG");
    /// assert_eq!(sanitizer.sanitize(b"AA^#AAGG").unwrap(), b"AAAAGG");
    /// ```
    pub fn sanitize(&self, bases: &[u8]) -> Result<Vec<u8>> {
        let mut clean = Vec::with_capacity(bases.len());
        let mut state = ScanState::Normal;

        for (position, &base) in bases.iter().enumerate() {
            state = match (base, state) {
                (b'+' | b'-', _) => ScanState::AwaitingIndelLength,
                (_, ScanState::AwaitingIndelLength) => {
                    if !base.is_ascii_digit() {
                        return Err(PileupError::InvalidIndelLength {
                            found: char::from(base),
                            position,
                        });
                    }
                    skip(base - b'0')
                }
                (b'^' | b'$', _) => ScanState::Skipping(1),
                (_, ScanState::Skipping(n)) => skip(n - 1),
                (_, ScanState::Normal) => {
                    clean.push(base);
                    ScanState::Normal
                }
            };
        }

        Ok(clean)
    }

    /// Returns a copy of `pile` whose bases have been sanitized.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`PileSanitizer::sanitize`].
    pub fn sanitize_pile(&self, pile: &Pile) -> Result<Pile> {
        Ok(pile.with_bases(self.sanitize(pile.bases())?))
    }
}

fn skip(n: u8) -> ScanState {
    if n == 0 { ScanState::Normal } else { ScanState::Skipping(n) }
}
