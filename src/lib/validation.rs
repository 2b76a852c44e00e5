//! Input validation utilities
//!
//! Common validation functions for command-line parameters and input paths, returning
//! structured errors from [`crate::errors`].

use crate::errors::{PileupError, Result};
use crate::phred::MAX_PHRED;
use std::fmt::Display;
use std::path::Path;

/// Returns true if `path` names standard input or output (`-`, `/dev/stdin`, `/dev/stdout`).
///
/// # Example
/// ```
/// use pilecall_lib::validation::is_std_stream;
///
/// assert!(is_std_stream("-"));
/// assert!(is_std_stream("/dev/stdin"));
/// assert!(!is_std_stream("input.pileup"));
/// ```
pub fn is_std_stream<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin" || path_str == "/dev/stdout"
}

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input pileup")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use pilecall_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.pileup", "Input pileup");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(PileupError::InvalidParameter {
            parameter: description.to_string(),
            reason: format!("File does not exist: {}", path_ref.display()),
        });
    }
    Ok(())
}

/// Validate that a frequency is in the valid range [0.0, 1.0]
///
/// # Errors
/// Returns an error if the frequency is not in [0.0, 1.0]
///
/// # Example
/// ```
/// use pilecall_lib::validation::validate_frequency;
///
/// validate_frequency(0.9, "min-base-frequency").unwrap();
/// assert!(validate_frequency(1.5, "min-base-frequency").is_err());
/// ```
pub fn validate_frequency(frequency: f64, _name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&frequency) {
        return Err(PileupError::InvalidFrequency { value: frequency, min: 0.0, max: 1.0 });
    }
    Ok(())
}

/// Validate that a quality score is in the valid Phred range [0, 93]
///
/// # Errors
/// Returns an error if the quality is above 93
///
/// # Example
/// ```
/// use pilecall_lib::validation::validate_quality_score;
///
/// validate_quality_score(30, "min-base-quality").unwrap();
/// assert!(validate_quality_score(100, "min-base-quality").is_err());
/// ```
pub fn validate_quality_score(quality: u8, _name: &str) -> Result<()> {
    if quality > MAX_PHRED {
        return Err(PileupError::InvalidQuality { value: quality, max: MAX_PHRED });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use pilecall_lib::validation::validate_positive;
///
/// validate_positive(10, "threads").unwrap();
/// assert!(validate_positive(0, "threads").is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(PileupError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}
