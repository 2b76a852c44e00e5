//! Metrics collection and reporting for pilecall runs.
//!
//! - [`pileup`] - Per-run locus counts
//! - [`writer`] - Metrics file I/O utilities

pub mod pileup;
pub mod writer;

use serde::{Deserialize, Serialize};

pub use pileup::PileupMetrics;
pub use writer::write_metrics;

/// Number of decimal places used for float metrics.
pub const FLOAT_PRECISION: usize = 6;

/// Formats a float value with the standard precision for metrics.
///
/// # Example
/// ```
/// use pilecall_lib::metrics::format_float;
/// assert_eq!(format_float(0.9), "0.900000");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages.
    fn metric_name() -> &'static str;
}

/// Common interface for metrics that count items in and out of a pipeline.
pub trait ProcessingMetrics {
    /// Total number of items read.
    fn total_input(&self) -> u64;

    /// Total number of items written.
    fn total_output(&self) -> u64;

    /// Total number of items rejected.
    fn total_filtered(&self) -> u64;

    /// Fraction of input items that made it to the output, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    fn pass_fraction(&self) -> f64 {
        if self.total_input() == 0 {
            0.0
        } else {
            self.total_output() as f64 / self.total_input() as f64
        }
    }
}
