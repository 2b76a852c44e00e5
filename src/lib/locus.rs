//! A single genomic locus and its per-sample piles.

use std::fmt;

use crate::consensus::{ConsensusCall, ConsensusCaller};
use crate::errors::Result;
use crate::phred::QualityEncoding;
use crate::pile::Pile;
use crate::quality_filter::QualityFilter;
use crate::sanitize::PileSanitizer;
use crate::stats::{GroupStats, LocusStats};

/// One pileup record split into control and experimental piles.
///
/// Sanitizing and filtering replace the piles with new values; group sizes never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    chromosome: String,
    coordinate: String,
    control_piles: Vec<Pile>,
    experimental_piles: Vec<Pile>,
}

impl Locus {
    #[must_use]
    pub fn new(
        chromosome: impl Into<String>,
        coordinate: impl Into<String>,
        control_piles: Vec<Pile>,
        experimental_piles: Vec<Pile>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            coordinate: coordinate.into(),
            control_piles,
            experimental_piles,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    #[must_use]
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    #[must_use]
    pub fn control_piles(&self) -> &[Pile] {
        &self.control_piles
    }

    #[must_use]
    pub fn experimental_piles(&self) -> &[Pile] {
        &self.experimental_piles
    }

    /// Identifier used in report rows, `<chromosome>_locus<coordinate>`.
    #[must_use]
    pub fn locus_id(&self) -> String {
        locus_id(&self.chromosome, &self.coordinate)
    }

    /// All piles, control first.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.control_piles.iter().chain(&self.experimental_piles)
    }

    /// Replaces every pile's bases with their sanitized form.
    ///
    /// # Errors
    ///
    /// Returns an error if any base string has a malformed indel length. The locus is left
    /// unchanged in that case.
    pub fn sanitize_all(&mut self) -> Result<()> {
        let sanitizer = PileSanitizer::new();
        let control = sanitize_group(&sanitizer, &self.control_piles)?;
        let experimental = sanitize_group(&sanitizer, &self.experimental_piles)?;
        self.control_piles = control;
        self.experimental_piles = experimental;
        Ok(())
    }

    /// Drops every base whose quality is below `quality_threshold`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pile's bases and scores differ in length. The locus is left
    /// unchanged in that case.
    pub fn filter_all(&mut self, quality_threshold: u8, encoding: QualityEncoding) -> Result<()> {
        let filter = QualityFilter::new(quality_threshold, encoding);
        let control = filter_group(&filter, &self.control_piles)?;
        let experimental = filter_group(&filter, &self.experimental_piles)?;
        self.control_piles = control;
        self.experimental_piles = experimental;
        Ok(())
    }

    /// True if every pile holds at least `min_depth` quality scores.
    #[must_use]
    pub fn validate_depth(&self, min_depth: usize) -> bool {
        self.piles().all(|pile| pile.depth() >= min_depth)
    }

    /// Calls the consensus base across the bases of every pile.
    #[must_use]
    pub fn call_consensus(
        &self,
        min_depth_of_coverage: usize,
        min_base_frequency: f64,
    ) -> ConsensusCall {
        let bases: Vec<&[u8]> = self.piles().map(Pile::bases).collect();
        ConsensusCaller::new(min_depth_of_coverage, min_base_frequency).call(&bases)
    }

    /// Match statistics of every pile against `base`.
    #[must_use]
    pub fn generate_stats(&self, base: u8) -> LocusStats {
        LocusStats::new(
            self.locus_id(),
            base.to_ascii_uppercase(),
            GroupStats::from_piles(&self.control_piles, base),
            GroupStats::from_piles(&self.experimental_piles, base),
        )
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chromosome: {}; coordinate: {}; control piles: {}; experimental piles: {}",
            self.chromosome,
            self.coordinate,
            self.control_piles.len(),
            self.experimental_piles.len()
        )
    }
}

/// Builds a locus identifier from its chromosome and coordinate.
#[must_use]
pub fn locus_id(chromosome: &str, coordinate: &str) -> String {
    format!("{chromosome}_locus{coordinate}")
}

fn sanitize_group(sanitizer: &PileSanitizer, piles: &[Pile]) -> Result<Vec<Pile>> {
    piles.iter().map(|pile| sanitizer.sanitize_pile(pile)).collect()
}

fn filter_group(filter: &QualityFilter, piles: &[Pile]) -> Result<Vec<Pile>> {
    piles.iter().map(|pile| filter.filter(pile)).collect()
}
