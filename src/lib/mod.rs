#![deny(unsafe_code)]
// Casts between counts and ratios are intentional throughout
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # pilecall - pileup consensus calling library
//!
//! Turns multi-sample pileup records into per-locus match statistics for two cohorts of
//! samples, a control group and an experimental group.
//!
//! ## Overview
//!
//! ### Locus pipeline
//!
//! - **[`parser`]** - Slicing pileup lines into per-sample piles
//! - **[`sanitize`]** - Removing indel, read-start and read-end markers from base strings
//! - **[`quality_filter`]** - Dropping low-quality bases
//! - **[`consensus`]** - Majority-vote base calling
//! - **[`locus`]** and **[`stats`]** - Per-locus orchestration and the report row
//! - **[`processor`]** - One line in, one retained row or rejection out
//!
//! ### Utilities
//!
//! - **[`config`]** - Sample groups and thresholds
//! - **[`phred`]** - Quality score encodings
//! - **[`validation`]** - Parameter and path checks
//! - **[`logging`]** and **[`progress`]** - Log formatting, timers and progress messages
//! - **[`metrics`]** and **[`rejection`]** - Run counts, rejection reasons and TSV output
//!
//! ## Quick Start
//!
//! ```
//! use pilecall_lib::config::{LocusThresholds, SampleGroups};
//! use pilecall_lib::processor::{LocusOutcome, LocusProcessor};
//!
//! # fn main() -> pilecall_lib::errors::Result<()> {
//! let groups = SampleGroups::new(vec![vec![0], vec![1]])?;
//! let thresholds = LocusThresholds {
//!     min_nominal_depth: 3,
//!     min_filtered_depth: 3,
//!     ..Default::default()
//! };
//! let processor = LocusProcessor::new(groups, thresholds)?;
//!
//! let line = "chr1\t100\tA\t3\tAA^]a\tIII\t4\tAAAa\tIIII";
//! match processor.process_line(line, 1)? {
//!     LocusOutcome::Retained(stats) => assert_eq!(stats.to_fields()[1], "3"),
//!     LocusOutcome::Rejected { reason, .. } => panic!("rejected: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consensus;
pub mod errors;
pub mod locus;
pub mod logging;
pub mod metrics;
pub mod parser;
pub mod phred;
pub mod pile;
pub mod processor;
pub mod progress;
pub mod quality_filter;
pub mod rejection;
pub mod sanitize;
pub mod stats;
pub mod validation;

pub use errors::{PileupError, Result};
