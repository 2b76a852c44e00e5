//! Formatting helpers and run summaries for log output.

use std::time::{Duration, Instant};

use crate::metrics::{PileupMetrics, ProcessingMetrics};
use crate::rejection::{RejectionReason, format_count};

/// Formats a fraction in `[0, 1]` as a percentage with `decimals` decimal places.
///
/// ```
/// use pilecall_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", fraction * 100.0)
}

/// Formats a duration with its two most significant units, e.g. `45s`, `2m 15s`, `1h 30m`.
///
/// ```
/// use pilecall_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (major, minor, units) = match secs {
        0..60 => return format!("{secs}s"),
        60..3600 => (secs / 60, secs % 60, ("m", "s")),
        _ => (secs / 3600, (secs % 3600) / 60, ("h", "m")),
    };
    if minor == 0 {
        format!("{major}{}", units.0)
    } else {
        format!("{major}{} {minor}{}", units.0, units.1)
    }
}

/// Formats a processing rate in loci per second, falling back to loci per minute for
/// slow runs.
///
/// ```
/// use pilecall_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1)), "1,000 loci/s");
/// assert_eq!(format_rate(30, Duration::from_secs(60)), "30.0 loci/min");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} loci/s", format_count(count));
    }

    let per_second = count as f64 / secs;
    if per_second >= 1.0 {
        format!("{} loci/s", format_count(per_second as u64))
    } else {
        format!("{:.1} loci/min", per_second * 60.0)
    }
}

/// Logs a formatted summary of a `stats` run.
///
/// Outputs the locus counts and every non-zero rejection reason, most frequent first.
///
/// # Examples
///
/// ```no_run
/// use pilecall_lib::logging::log_pileup_summary;
/// use pilecall_lib::metrics::PileupMetrics;
/// use pilecall_lib::rejection::RejectionReason;
///
/// let mut metrics = PileupMetrics::new();
/// metrics.add_retained();
/// metrics.add_rejection(RejectionReason::NoConsensus);
///
/// log_pileup_summary(&metrics);
/// ```
pub fn log_pileup_summary(metrics: &PileupMetrics) {
    log::info!("Pileup Summary:");
    log::info!("  Loci read: {}", format_count(metrics.total_input()));
    log::info!("  Loci retained: {}", format_count(metrics.total_output()));
    log::info!("  Loci rejected: {}", format_count(metrics.total_filtered()));

    if metrics.total_input() > 0 {
        log::info!("  Retention rate: {}", format_percent(metrics.pass_fraction(), 2));
    }

    if metrics.total_filtered() > 0 {
        log::info!("  Rejection reasons:");
        let mut reasons: Vec<(RejectionReason, u64)> = RejectionReason::ALL
            .iter()
            .map(|&reason| (reason, metrics.rejections(reason)))
            .filter(|&(_, count)| count > 0)
            .collect();
        reasons.sort_by(|a, b| b.1.cmp(&a.1));

        for (reason, count) in reasons {
            log::info!("    {}: {}", reason.description(), format_count(count));
        }
    }
}

/// Times a long-running step and logs its start and completion.
///
/// ```no_run
/// use pilecall_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Computing locus statistics");
/// // ... process loci ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Starts the timer, logging `"<operation> ..."`.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the number of loci processed, the elapsed time and the rate.
    pub fn log_completion(&self, count: u64) {
        let elapsed = self.elapsed();
        log::info!(
            "{} completed: {} loci in {} ({})",
            self.operation,
            format_count(count),
            format_duration(elapsed),
            format_rate(count, elapsed)
        );
    }
}
