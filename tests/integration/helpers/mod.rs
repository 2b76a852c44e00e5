//! Helper utilities for integration tests.

pub mod pileup_generator;

pub use pileup_generator::*;
