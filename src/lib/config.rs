//! Run configuration shared by the parser, the locus aggregator and the CLI.
//!
//! All thresholds travel together in [`LocusThresholds`] so that every stage of the
//! pipeline sees the same policy.

use std::collections::HashSet;
use std::fmt;

use crate::errors::{PileupError, Result};
use crate::phred::QualityEncoding;
use crate::validation::{validate_frequency, validate_quality_score};

/// Control and experimental sample indices.
///
/// Indices are zero-based positions of samples in a pileup line. They need not be
/// contiguous or cover every sample, but the two groups must be disjoint and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGroups {
    control: Vec<usize>,
    experimental: Vec<usize>,
}

impl SampleGroups {
    /// Creates a grouping from a list of groups, which must contain exactly two entries:
    /// control first, experimental second.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::InvalidGrouping`] if there are not exactly two groups, if a
    /// group is empty, or if a sample appears more than once.
    ///
    /// # Examples
    /// ```
    /// use pilecall_lib::config::SampleGroups;
    ///
    /// let groups = SampleGroups::new(vec![vec![0, 1], vec![2, 3]]).unwrap();
    /// assert_eq!(groups.control(), &[0, 1]);
    /// assert!(SampleGroups::new(vec![vec![0, 1]]).is_err());
    /// ```
    pub fn new(groups: Vec<Vec<usize>>) -> Result<Self> {
        let [control, experimental]: [Vec<usize>; 2] =
            groups.try_into().map_err(|groups: Vec<Vec<usize>>| PileupError::InvalidGrouping {
                reason: format!("expected exactly 2 groups, got {}", groups.len()),
            })?;

        for (name, group) in [("control", &control), ("experimental", &experimental)] {
            if group.is_empty() {
                return Err(PileupError::InvalidGrouping {
                    reason: format!("the {name} group is empty"),
                });
            }
        }

        let mut seen = HashSet::new();
        for index in control.iter().chain(&experimental) {
            if !seen.insert(*index) {
                return Err(PileupError::InvalidGrouping {
                    reason: format!("sample {index} is listed more than once"),
                });
            }
        }

        Ok(Self { control, experimental })
    }

    #[must_use]
    pub fn control(&self) -> &[usize] {
        &self.control
    }

    #[must_use]
    pub fn experimental(&self) -> &[usize] {
        &self.experimental
    }

    /// Largest configured sample index.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.control.iter().chain(&self.experimental).copied().max().unwrap_or(0)
    }
}

impl fmt::Display for SampleGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control {:?}, experimental {:?}", self.control, self.experimental)
    }
}

/// Thresholds applied to every locus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocusThresholds {
    /// Minimum declared depth of every sample, checked before any filtering
    pub min_nominal_depth: usize,
    /// Minimum Phred quality for a base to be kept
    pub min_base_quality: u8,
    /// Encoding of the quality strings
    pub quality_encoding: QualityEncoding,
    /// Minimum depth of every pile after quality filtering
    pub min_filtered_depth: usize,
    /// Minimum fraction of observations supporting the consensus base
    pub min_base_frequency: f64,
}

impl Default for LocusThresholds {
    fn default() -> Self {
        Self {
            min_nominal_depth: 10,
            min_base_quality: 20,
            quality_encoding: QualityEncoding::Phred33,
            min_filtered_depth: 10,
            min_base_frequency: 0.9,
        }
    }
}

impl LocusThresholds {
    /// Checks that every threshold is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if the base frequency is outside `[0, 1]` or the base quality is
    /// above the maximum Phred score.
    pub fn validate(&self) -> Result<()> {
        validate_frequency(self.min_base_frequency, "min-base-frequency")?;
        validate_quality_score(self.min_base_quality, "min-base-quality")?;
        Ok(())
    }
}
