//! Base quality filtering for sanitized piles.

use crate::errors::{PileupError, Result};
use crate::phred::{PhredScore, QualityDecoder, QualityEncoding};
use crate::pile::Pile;

/// Drops bases whose quality is below a threshold.
///
/// Bases and scores are filtered in lock-step, so the i-th base of the output pile still
/// carries the quality it was observed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityFilter {
    quality_threshold: PhredScore,
    decoder: QualityDecoder,
}

impl QualityFilter {
    /// Creates a filter keeping bases with quality `>= quality_threshold`.
    #[must_use]
    pub fn new(quality_threshold: u8, encoding: QualityEncoding) -> Self {
        Self {
            quality_threshold: PhredScore::from(quality_threshold),
            decoder: QualityDecoder::new(encoding),
        }
    }

    #[must_use]
    pub fn quality_threshold(&self) -> PhredScore {
        self.quality_threshold
    }

    /// Returns a new pile holding only the bases that pass the quality threshold.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::LengthMismatch`] if the pile's bases and scores differ in
    /// length, which happens when a pile is filtered before it has been sanitized.
    ///
    /// # Examples
    /// ```
    /// use pilecall_lib::phred::QualityEncoding;
    /// use pilecall_lib::pile::Pile;
    /// use pilecall_lib::quality_filter::QualityFilter;
    ///
    /// let filter = QualityFilter::new(40, QualityEncoding::Phred64);
    /// let pile = filter.filter(&Pile::new("GATTACA", "hUqpVu^")).unwrap();
    /// assert_eq!(pile, Pile::new("GTTC", "hqpu"));
    /// ```
    pub fn filter(&self, pile: &Pile) -> Result<Pile> {
        if pile.bases().len() != pile.scores().len() {
            return Err(PileupError::LengthMismatch {
                bases: pile.bases().len(),
                scores: pile.scores().len(),
            });
        }

        let (bases, scores): (Vec<u8>, Vec<u8>) = pile
            .bases()
            .iter()
            .zip(pile.scores())
            .filter(|&(_, &score)| self.decoder.char_to_int(score) >= self.quality_threshold)
            .map(|(&base, &score)| (base, score))
            .unzip();

        Ok(Pile::new(bases, scores))
    }
}
