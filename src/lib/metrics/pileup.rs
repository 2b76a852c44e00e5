//! Locus counts for a `stats` run.

use serde::{Deserialize, Serialize};

use super::{Metric, ProcessingMetrics, format_float};
use crate::rejection::RejectionReason;

/// Counts of loci read, retained and rejected, broken down by rejection reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PileupMetrics {
    /// Pileup records read, excluding blank and comment lines
    pub total_loci: u64,
    /// Loci written to the output
    pub retained_loci: u64,
    /// Loci rejected for any reason
    pub rejected_loci: u64,
    /// Loci with a sample below the minimum nominal depth
    pub rejected_insufficient_nominal_depth: u64,
    /// Loci with a pile below the minimum depth after quality filtering
    pub rejected_insufficient_filtered_depth: u64,
    /// Loci without a consensus base
    pub rejected_no_consensus: u64,
    /// Records that could not be parsed
    pub rejected_malformed_record: u64,
    /// `retained_loci / total_loci`
    pub fraction_retained: String,
}

impl PileupMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self { fraction_retained: format_float(0.0), ..Default::default() }
    }

    /// Counts one retained locus.
    pub fn add_retained(&mut self) {
        self.total_loci += 1;
        self.retained_loci += 1;
    }

    /// Counts one rejected locus.
    pub fn add_rejection(&mut self, reason: RejectionReason) {
        self.total_loci += 1;
        self.rejected_loci += 1;
        match reason {
            RejectionReason::InsufficientNominalDepth => {
                self.rejected_insufficient_nominal_depth += 1;
            }
            RejectionReason::InsufficientFilteredDepth => {
                self.rejected_insufficient_filtered_depth += 1;
            }
            RejectionReason::NoConsensus => self.rejected_no_consensus += 1,
            RejectionReason::MalformedRecord => self.rejected_malformed_record += 1,
        }
    }

    /// Number of loci rejected for `reason`.
    #[must_use]
    pub fn rejections(&self, reason: RejectionReason) -> u64 {
        match reason {
            RejectionReason::InsufficientNominalDepth => self.rejected_insufficient_nominal_depth,
            RejectionReason::InsufficientFilteredDepth => {
                self.rejected_insufficient_filtered_depth
            }
            RejectionReason::NoConsensus => self.rejected_no_consensus,
            RejectionReason::MalformedRecord => self.rejected_malformed_record,
        }
    }

    /// Fills in the derived fields. Call once all counts are in.
    pub fn finalize(&mut self) {
        self.fraction_retained = format_float(self.pass_fraction());
    }
}

impl Metric for PileupMetrics {
    fn metric_name() -> &'static str {
        "pileup"
    }
}

impl ProcessingMetrics for PileupMetrics {
    fn total_input(&self) -> u64 {
        self.total_loci
    }

    fn total_output(&self) -> u64 {
        self.retained_loci
    }

    fn total_filtered(&self) -> u64 {
        self.rejected_loci
    }
}
