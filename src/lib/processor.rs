//! Turns one pileup line into either a report row or a rejection.
//!
//! Per line the steps are: nominal depth gate, slicing into a [`Locus`], sanitizing,
//! quality filtering, filtered depth gate, consensus calling and finally statistics.
//! Any step may reject the locus; rejections are values, not errors. Only configuration
//! problems (such as a sample index the line does not have) come back as `Err`.

use crate::config::{LocusThresholds, SampleGroups};
use crate::consensus::ConsensusCall;
use crate::errors::{PileupError, Result};
use crate::locus::{Locus, locus_id};
use crate::parser::{PileupLineParser, split_fields};
use crate::rejection::RejectionReason;
use crate::stats::LocusStats;

/// What became of one pileup line.
#[derive(Debug, Clone, PartialEq)]
pub enum LocusOutcome {
    /// The locus passed every gate
    Retained(LocusStats),
    /// The locus was dropped
    Rejected {
        /// `<chromosome>_locus<coordinate>`, or `line <n>` when the record is too
        /// malformed to name
        locus: String,
        reason: RejectionReason,
        /// Extra context for the log
        detail: String,
    },
}

/// Applies one set of thresholds to pileup lines.
#[derive(Debug, Clone)]
pub struct LocusProcessor {
    parser: PileupLineParser,
    thresholds: LocusThresholds,
}

impl LocusProcessor {
    /// Creates a processor after validating the thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is out of range.
    pub fn new(groups: SampleGroups, thresholds: LocusThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { parser: PileupLineParser::new(groups), thresholds })
    }

    #[must_use]
    pub fn parser(&self) -> &PileupLineParser {
        &self.parser
    }

    #[must_use]
    pub fn thresholds(&self) -> &LocusThresholds {
        &self.thresholds
    }

    /// Processes a single line. `line_number` is one-based and only used to name records
    /// whose chromosome or coordinate cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error only for configuration problems; malformed records are returned
    /// as [`LocusOutcome::Rejected`] with [`RejectionReason::MalformedRecord`].
    pub fn process_line(&self, line: &str, line_number: u64) -> Result<LocusOutcome> {
        let fields = split_fields(line);
        let name = match (fields.first(), fields.get(1)) {
            (Some(chromosome), Some(coordinate)) => locus_id(chromosome, coordinate),
            _ => format!("line {line_number}"),
        };

        match self.process_fields(&fields) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_record_error() => Ok(LocusOutcome::Rejected {
                locus: name,
                reason: RejectionReason::MalformedRecord,
                detail: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Processes a line as read from the input. A line that is not valid UTF-8 is
    /// rejected as malformed and named by its line number.
    ///
    /// # Errors
    ///
    /// See [`LocusProcessor::process_line`].
    pub fn process_bytes(&self, line: &[u8], line_number: u64) -> Result<LocusOutcome> {
        match std::str::from_utf8(line) {
            Ok(line) => self.process_line(line, line_number),
            Err(e) => Ok(LocusOutcome::Rejected {
                locus: format!("line {line_number}"),
                reason: RejectionReason::MalformedRecord,
                detail: format!("record is not valid UTF-8 ({e})"),
            }),
        }
    }

    fn process_fields(&self, fields: &[&str]) -> Result<LocusOutcome> {
        let min_nominal = self.thresholds.min_nominal_depth;
        if !self.parser.validate(fields, min_nominal)? {
            // The depth gate runs before slicing, so still surface a bad sample index here
            let locus = self.parser.generate_locus(fields)?;
            return Ok(rejected(
                &locus,
                RejectionReason::InsufficientNominalDepth,
                format!("a sample has a declared depth below {min_nominal}"),
            ));
        }

        let mut locus = self.parser.generate_locus(fields)?;
        locus.sanitize_all()?;
        locus.filter_all(self.thresholds.min_base_quality, self.thresholds.quality_encoding)?;

        let min_filtered = self.thresholds.min_filtered_depth;
        if !locus.validate_depth(min_filtered) {
            return Ok(rejected(
                &locus,
                RejectionReason::InsufficientFilteredDepth,
                format!("a pile has fewer than {min_filtered} bases after quality filtering"),
            ));
        }

        match locus.call_consensus(min_filtered, self.thresholds.min_base_frequency) {
            ConsensusCall::Called(base) => Ok(LocusOutcome::Retained(locus.generate_stats(base))),
            ConsensusCall::NoCall(reason) => {
                Ok(rejected(&locus, reason.into(), reason.description().to_string()))
            }
        }
    }

    /// Fails fast if the configured sample indices do not fit a line with `samples`
    /// samples.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::SampleOutOfRange`] for the largest configured index.
    pub fn check_sample_count(&self, samples: usize) -> Result<()> {
        let max_index = self.parser.groups().max_index();
        if max_index >= samples {
            return Err(PileupError::SampleOutOfRange { index: max_index, samples });
        }
        Ok(())
    }
}

fn rejected(locus: &Locus, reason: RejectionReason, detail: String) -> LocusOutcome {
    LocusOutcome::Rejected { locus: locus.locus_id(), reason, detail }
}
