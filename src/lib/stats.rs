//! Per-locus match statistics and their report row.
//!
//! A row is laid out as:
//!
//! ```text
//! locus_id  ctrl_match  ctrl_total  ctrl_ratio  |  exp_match  exp_total  exp_ratio  |  ctrl piles...  |  exp piles...
//! ```
//!
//! where each pile contributes a `match`, `total` pair.

use std::fmt;

use crate::pile::Pile;

/// Separator column between the sections of a row.
pub const SECTION_SEPARATOR: &str = "|";

/// Rendering of a ratio whose denominator is zero.
pub const MISSING_RATIO: &str = "NA";

/// Matches against the called base in one pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PileStats {
    pub matches: usize,
    pub total: usize,
}

impl PileStats {
    /// Counts the bases of `pile` equal to `base`, ignoring case.
    #[must_use]
    pub fn from_pile(pile: &Pile, base: u8) -> Self {
        Self { matches: pile.count_matches(base), total: pile.bases().len() }
    }
}

/// Match counts for one cohort, pile by pile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupStats {
    piles: Vec<PileStats>,
}

impl GroupStats {
    #[must_use]
    pub fn new(piles: Vec<PileStats>) -> Self {
        Self { piles }
    }

    /// Builds the statistics of `piles` against the called `base`.
    #[must_use]
    pub fn from_piles(piles: &[Pile], base: u8) -> Self {
        Self::new(piles.iter().map(|pile| PileStats::from_pile(pile, base)).collect())
    }

    #[must_use]
    pub fn piles(&self) -> &[PileStats] {
        &self.piles
    }

    /// Sum of matching bases over the cohort.
    #[must_use]
    pub fn matches(&self) -> usize {
        self.piles.iter().map(|p| p.matches).sum()
    }

    /// Sum of observed bases over the cohort.
    #[must_use]
    pub fn total(&self) -> usize {
        self.piles.iter().map(|p| p.total).sum()
    }

    /// Fraction of matching bases, or `None` when the cohort has no observations.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        match_ratio(self.matches(), self.total())
    }
}

/// Statistics of one retained locus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusStats {
    locus_id: String,
    called_base: u8,
    control: GroupStats,
    experimental: GroupStats,
}

impl LocusStats {
    #[must_use]
    pub fn new(
        locus_id: impl Into<String>,
        called_base: u8,
        control: GroupStats,
        experimental: GroupStats,
    ) -> Self {
        Self { locus_id: locus_id.into(), called_base, control, experimental }
    }

    #[must_use]
    pub fn locus_id(&self) -> &str {
        &self.locus_id
    }

    /// The consensus base the matches were counted against.
    #[must_use]
    pub fn called_base(&self) -> u8 {
        self.called_base
    }

    #[must_use]
    pub fn control(&self) -> &GroupStats {
        &self.control
    }

    #[must_use]
    pub fn experimental(&self) -> &GroupStats {
        &self.experimental
    }

    /// The row as a list of fields.
    #[must_use]
    pub fn to_fields(&self) -> Vec<String> {
        let pile_fields = 2 * (self.control.piles.len() + self.experimental.piles.len());
        let mut fields = Vec::with_capacity(10 + pile_fields);

        fields.push(self.locus_id.clone());
        push_summary(&mut fields, &self.control);
        fields.push(SECTION_SEPARATOR.to_string());
        push_summary(&mut fields, &self.experimental);
        fields.push(SECTION_SEPARATOR.to_string());
        push_piles(&mut fields, &self.control);
        fields.push(SECTION_SEPARATOR.to_string());
        push_piles(&mut fields, &self.experimental);

        fields
    }
}

impl fmt::Display for LocusStats {
    /// Tab-separated row, without a line terminator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fields().join("\t"))
    }
}

fn push_summary(fields: &mut Vec<String>, group: &GroupStats) {
    fields.push(group.matches().to_string());
    fields.push(group.total().to_string());
    fields.push(group.ratio().map_or_else(|| MISSING_RATIO.to_string(), format_ratio));
}

fn push_piles(fields: &mut Vec<String>, group: &GroupStats) {
    for pile in &group.piles {
        fields.push(pile.matches.to_string());
        fields.push(pile.total.to_string());
    }
}

/// `matches` scaled by the reciprocal of `total`, or `None` when `total` is zero.
///
/// A full match is exactly `1.0`.
#[must_use]
pub fn match_ratio(matches: usize, total: usize) -> Option<f64> {
    match total {
        0 => None,
        t if matches == t => Some(1.0),
        t => Some(matches as f64 * (1.0 / t as f64)),
    }
}

/// Formats a ratio with one decimal for whole numbers and the shortest round-trip
/// representation otherwise, e.g. `1.0` and `0.9857142857142857`.
#[must_use]
pub fn format_ratio(ratio: f64) -> String {
    if ratio.fract() == 0.0 { format!("{ratio:.1}") } else { ratio.to_string() }
}
