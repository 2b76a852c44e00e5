//! Periodic progress logging while streaming loci.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::rejection::format_count;

/// Default number of loci between progress messages.
pub const DEFAULT_INTERVAL: u64 = 1_000_000;

/// Counts processed loci and logs a message each time the count crosses a multiple of the
/// interval.
///
/// The count is atomic so a tracker can be shared between worker threads.
///
/// # Example
/// ```
/// use pilecall_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Processed").with_interval(100);
/// for i in 0..250 {
///     tracker.log_if_needed(1, &format!("chr1_locus{i}"));
/// }
/// tracker.log_final(); // "Processed 250 loci (complete)"
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: DEFAULT_INTERVAL, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Sets the number of loci between messages. Zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` loci to the count and logs once per interval boundary crossed,
    /// naming `last_locus` as the most recent position.
    ///
    /// Returns true if the count now sits exactly on a boundary.
    pub fn log_if_needed(&self, additional: u64, last_locus: &str) -> bool {
        let previous = self.count.fetch_add(additional, Ordering::Relaxed);
        let current = previous + additional;

        for boundary in (previous / self.interval + 1)..=(current / self.interval) {
            info!(
                "{} {} loci, last at {}",
                self.message,
                format_count(boundary * self.interval),
                last_locus
            );
        }

        current > 0 && current.is_multiple_of(self.interval)
    }

    /// Logs the final count unless it was already logged as a boundary.
    pub fn log_final(&self) {
        let count = self.count();
        if count > 0 && !count.is_multiple_of(self.interval) {
            info!("{} {} loci (complete)", self.message, format_count(count));
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
