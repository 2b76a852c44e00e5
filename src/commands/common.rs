//! CLI option groups shared by commands, composed with `#[command(flatten)]`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use pilecall_lib::config::LocusThresholds;
use pilecall_lib::phred::QualityEncoding;
use pilecall_lib::validation::{is_std_stream, validate_file_exists, validate_positive};

/// Input pileup and output table.
#[derive(Debug, Clone, Args)]
pub struct PileupIoOptions {
    /// Input pileup file, or `-` for stdin. Gzipped input is detected from a `.gz` suffix.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output statistics table, or `-` for stdout
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl PileupIoOptions {
    /// Validates that the input file exists (skipped for stdin).
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_std_stream(&self.input) {
            validate_file_exists(&self.input, "Input pileup")?;
        }
        Ok(())
    }
}

/// Per-locus thresholds.
#[derive(Debug, Clone, Args)]
pub struct ThresholdOptions {
    /// Minimum declared depth of every sample, checked before any filtering
    #[arg(long = "min-depth", default_value_t = 10)]
    pub min_depth: usize,

    /// Minimum Phred base quality; lower-quality bases are dropped
    #[arg(long = "min-base-quality", default_value_t = 20)]
    pub min_base_quality: u8,

    /// ASCII offset of the quality strings: 33 (Sanger) or 64 (Illumina 1.3-1.7)
    #[arg(long = "quality-offset", default_value = "33")]
    pub quality_offset: QualityEncoding,

    /// Minimum depth of every pile after quality filtering
    #[arg(long = "min-filtered-depth", default_value_t = 10)]
    pub min_filtered_depth: usize,

    /// Minimum fraction of observations supporting the consensus base
    #[arg(long = "min-base-frequency", default_value_t = 0.9)]
    pub min_base_frequency: f64,
}

impl ThresholdOptions {
    /// Collects the options into validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is out of range.
    pub fn to_thresholds(&self) -> anyhow::Result<LocusThresholds> {
        let thresholds = LocusThresholds {
            min_nominal_depth: self.min_depth,
            min_base_quality: self.min_base_quality,
            quality_encoding: self.quality_offset,
            min_filtered_depth: self.min_filtered_depth,
            min_base_frequency: self.min_base_frequency,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }
}

/// Parallelism options.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of worker threads
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Number of lines processed per batch
    #[arg(long = "batch-size", default_value_t = 10_000)]
    pub batch_size: usize,
}

impl ThreadingOptions {
    /// # Errors
    ///
    /// Returns an error if the thread count or batch size is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_positive(self.threads, "threads")?;
        validate_positive(self.batch_size, "batch-size")?;
        Ok(())
    }
}

/// One `--group` value: a comma-separated list of zero-based sample indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGroupArg(pub Vec<usize>);

impl FromStr for SampleGroupArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|index| {
                let index = index.trim();
                index.parse::<usize>().map_err(|_| {
                    format!("'{index}' is not a sample index (expected e.g. 0,1,2)")
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SampleGroupArg)
    }
}

impl fmt::Display for SampleGroupArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", indices.join(","))
    }
}
