//! CLI command implementations for pilecall.
//!
//! - [`stats`] - Per-locus consensus calls and cohort match statistics from a pileup

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate, clippy::needless_pass_by_value)]

pub mod command;
pub mod common;
pub mod stats;
