//! Slicing of multi-sample pileup lines into per-sample piles.
//!
//! A line holds three leading fields (chromosome, coordinate, reference base) followed by
//! one `depth`, `bases`, `scores` triple per sample:
//!
//! ```text
//! chr1  667  N  34  AAAA...  B::D...  14  AAAA...  DDDD...
//!               \---- sample 0 ----/  \---- sample 1 ----/
//! ```
//!
//! Sample `i` therefore starts at field `3 * (i + 1)`.

use crate::config::SampleGroups;
use crate::errors::{PileupError, Result};
use crate::locus::Locus;
use crate::pile::Pile;

/// Number of leading fields before the first sample.
const LEADING_FIELDS: usize = 3;

/// Number of fields per sample.
const FIELDS_PER_SAMPLE: usize = 3;

/// Splits a raw pileup line into its tab-separated fields.
#[must_use]
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\n', '\r']).split('\t').collect()
}

/// The three fields of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SampleFields<'a> {
    depth: &'a str,
    bases: &'a str,
    scores: &'a str,
}

/// Builds [`Locus`] values from pileup lines for a fixed sample grouping.
#[derive(Debug, Clone)]
pub struct PileupLineParser {
    groups: SampleGroups,
}

impl PileupLineParser {
    #[must_use]
    pub fn new(groups: SampleGroups) -> Self {
        Self { groups }
    }

    /// Creates a parser from a raw list of groups.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::InvalidGrouping`] unless `groups` holds exactly two disjoint,
    /// non-empty groups.
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Result<Self> {
        Ok(Self::new(SampleGroups::new(groups)?))
    }

    #[must_use]
    pub fn groups(&self) -> &SampleGroups {
        &self.groups
    }

    /// Number of complete sample triples in the line.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] if the leading fields are missing or the
    /// last sample is cut short.
    pub fn sample_count(&self, line: &[&str]) -> Result<usize> {
        if line.len() < LEADING_FIELDS {
            return Err(PileupError::MalformedRecord {
                reason: format!("expected at least {LEADING_FIELDS} fields, found {}", line.len()),
            });
        }
        let sample_fields = line.len() - LEADING_FIELDS;
        if sample_fields % FIELDS_PER_SAMPLE != 0 {
            return Err(PileupError::MalformedRecord {
                reason: format!(
                    "{} fields do not form complete depth/bases/scores triples",
                    line.len()
                ),
            });
        }
        Ok(sample_fields / FIELDS_PER_SAMPLE)
    }

    /// Piles for the given sample indices, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] for a truncated line and
    /// [`PileupError::SampleOutOfRange`] if an index has no fields in a well-formed line.
    pub fn get_piles_from_group(&self, indices: &[usize], line: &[&str]) -> Result<Vec<Pile>> {
        let samples = self.sample_count(line)?;
        indices
            .iter()
            .map(|&index| {
                let fields = sample_fields(line, index, samples)?;
                Ok(Pile::new(fields.bases, fields.scores))
            })
            .collect()
    }

    /// Piles of the control group.
    ///
    /// # Errors
    ///
    /// See [`PileupLineParser::get_piles_from_group`].
    pub fn get_control_piles(&self, line: &[&str]) -> Result<Vec<Pile>> {
        self.get_piles_from_group(self.groups.control(), line)
    }

    /// Piles of the experimental group.
    ///
    /// # Errors
    ///
    /// See [`PileupLineParser::get_piles_from_group`].
    pub fn get_experimental_piles(&self, line: &[&str]) -> Result<Vec<Pile>> {
        self.get_piles_from_group(self.groups.experimental(), line)
    }

    /// Base strings of every sample in the line, grouped or not, in field order.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] for a truncated line.
    pub fn get_all_bases<'a>(&self, line: &[&'a str]) -> Result<Vec<&'a str>> {
        let samples = self.sample_count(line)?;
        Ok((0..samples).map(|i| line[sample_offset(i) + 1]).collect())
    }

    /// Declared depth of every sample in the line, in field order.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] for a truncated line or a depth that is not
    /// a non-negative integer.
    pub fn get_lengths(&self, line: &[&str]) -> Result<Vec<usize>> {
        let samples = self.sample_count(line)?;
        (0..samples)
            .map(|i| {
                let depth = sample_fields(line, i, samples)?.depth;
                depth.trim().parse::<usize>().map_err(|_| PileupError::MalformedRecord {
                    reason: format!("depth of sample {i} is not an integer: '{depth}'"),
                })
            })
            .collect()
    }

    /// True if every sample's declared depth is at least `min_length`.
    ///
    /// This looks at the nominal depth column only, before any sanitizing or filtering.
    ///
    /// # Errors
    ///
    /// See [`PileupLineParser::get_lengths`].
    pub fn validate(&self, line: &[&str], min_length: usize) -> Result<bool> {
        Ok(self.get_lengths(line)?.iter().all(|&depth| depth >= min_length))
    }

    /// The chromosome field.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] if the line is empty.
    pub fn get_chromosome<'a>(&self, line: &[&'a str]) -> Result<&'a str> {
        line.first().copied().ok_or_else(|| PileupError::MalformedRecord {
            reason: "missing chromosome field".to_string(),
        })
    }

    /// The coordinate field, kept as an opaque string.
    ///
    /// # Errors
    ///
    /// Returns [`PileupError::MalformedRecord`] if the line has fewer than two fields.
    pub fn get_coordinate<'a>(&self, line: &[&'a str]) -> Result<&'a str> {
        line.get(1).copied().ok_or_else(|| PileupError::MalformedRecord {
            reason: "missing coordinate field".to_string(),
        })
    }

    /// Builds the locus for a line.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the individual accessors.
    pub fn generate_locus(&self, line: &[&str]) -> Result<Locus> {
        Ok(Locus::new(
            self.get_chromosome(line)?,
            self.get_coordinate(line)?,
            self.get_control_piles(line)?,
            self.get_experimental_piles(line)?,
        ))
    }
}

#[inline]
fn sample_offset(index: usize) -> usize {
    FIELDS_PER_SAMPLE * (index + 1)
}

fn sample_fields<'a>(line: &[&'a str], index: usize, samples: usize) -> Result<SampleFields<'a>> {
    if index >= samples {
        return Err(PileupError::SampleOutOfRange { index, samples });
    }
    let offset = sample_offset(index);
    Ok(SampleFields { depth: line[offset], bases: line[offset + 1], scores: line[offset + 2] })
}
