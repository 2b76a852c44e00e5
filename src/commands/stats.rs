//! Consensus calls and per-cohort match statistics for every locus of a pileup.
//!
//! Lines are read in batches, each batch is processed on a rayon pool and the results are
//! written in input order. Rejected loci are logged and optionally written to a rejects
//! table; a summary of the run is always logged and optionally written as a metrics file.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fgoxide::io::Io;
use log::info;
use rayon::prelude::*;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pilecall_lib::config::SampleGroups;
use pilecall_lib::logging::{OperationTimer, log_pileup_summary};
use pilecall_lib::metrics::PileupMetrics;
use pilecall_lib::metrics::writer::write_metrics_auto;
use pilecall_lib::parser::split_fields;
use pilecall_lib::processor::{LocusOutcome, LocusProcessor};
use pilecall_lib::progress::ProgressTracker;
use pilecall_lib::rejection::RejectionReason;
use pilecall_lib::validation::is_std_stream;

use crate::commands::command::Command;
use crate::commands::common::{PileupIoOptions, SampleGroupArg, ThreadingOptions, ThresholdOptions};

/// Buffer size for reading and writing text files.
const BUFFER_SIZE: usize = 64 * 1024;

/// Compression level used when an output path ends in `.gz`.
const COMPRESSION_LEVEL: u32 = 5;

/// Computes consensus calls and match statistics from a multi-sample pileup.
#[derive(Debug, Parser)]
#[command(
    name = "stats",
    about = "\x1b[38;5;72m[PILEUP]\x1b[0m         \x1b[36mCall consensus bases and per-cohort match statistics\x1b[0m",
    long_about = r#"
Call a consensus base at every locus of a multi-sample pileup and report how many bases of
each sample, and of each cohort, match it.

Each input line holds a chromosome, a coordinate and a reference base, followed by one
depth/bases/qualities triple per sample. Samples are assigned to the control cohort and the
experimental cohort with two --group options, each a comma-separated list of zero-based
sample indices. The first --group is the control cohort.

For every locus:
  1. every sample's declared depth must be at least --min-depth
  2. read-start (^ plus mapping quality), read-end ($) and indel (+N / -N) markers are
     removed from the bases; only single-digit indel lengths are supported
  3. bases below --min-base-quality are dropped
  4. every sample must keep at least --min-filtered-depth bases
  5. the most common base across all samples must make up at least --min-base-frequency
     of all bases; ties are broken in the order A, C, G, T

Loci failing any step are rejected and logged. Each retained locus produces one row:

  <chrom>_locus<coord>  ctrl_match  ctrl_total  ctrl_ratio  |  exp_match  exp_total  exp_ratio
  |  <match> <total> per control sample  |  <match> <total> per experimental sample

Example usage:
  pilecall stats -i samples.pileup -o loci.tsv -g 0,1 -g 2,3
  samtools mpileup ... | pilecall stats -i - -o loci.tsv -g 0 -g 1 --threads 4
"#
)]
pub struct Stats {
    /// Input/output options
    #[command(flatten)]
    pub io: PileupIoOptions,

    /// Optional output table of rejected loci (columns `locus`, `reason`)
    #[arg(long = "rejects")]
    pub rejects: Option<PathBuf>,

    /// Optional output file for run metrics
    #[arg(long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Sample indices of one cohort, comma-separated; give exactly twice, control first
    #[arg(short = 'g', long = "group", required = true)]
    pub groups: Vec<SampleGroupArg>,

    /// Locus thresholds
    #[command(flatten)]
    pub thresholds: ThresholdOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Command for Stats {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.io.validate()?;
        self.threading.validate()?;
        if self.rejects.as_deref().is_some_and(is_std_stream) && is_std_stream(&self.io.output) {
            bail!("--rejects and --output cannot both be written to stdout");
        }

        let groups = SampleGroups::new(self.groups.iter().map(|g| g.0.clone()).collect())?;
        let processor = LocusProcessor::new(groups, self.thresholds.to_thresholds()?)?;
        let thresholds = processor.thresholds();

        info!("Starting Stats");
        info!("Command line: {command_line}");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        info!("Sample groups: {}", processor.parser().groups());
        info!(
            "Minimum depth: {} nominal, {} after filtering",
            thresholds.min_nominal_depth, thresholds.min_filtered_depth
        );
        info!(
            "Minimum base quality: {} ({})",
            thresholds.min_base_quality, thresholds.quality_encoding
        );
        info!("Minimum base frequency: {}", thresholds.min_base_frequency);
        info!("Threads: {}", self.threading.threads);

        let timer = OperationTimer::new("Computing locus statistics");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threading.threads)
            .build()
            .context("Failed to build thread pool")?;

        let mut reader = open_input(&self.io.input)?;
        let mut sink = OutcomeSink {
            output: open_output(&self.io.output)?,
            rejects: self.rejects.as_ref().map(RejectsWriter::new).transpose()?,
            metrics: PileupMetrics::new(),
            progress: ProgressTracker::new("Processed"),
        };

        let mut batch: Vec<(u64, Vec<u8>)> = Vec::with_capacity(self.threading.batch_size);
        let mut checked_samples = false;
        let mut buffer = Vec::new();
        let mut line_number = 0u64;

        loop {
            buffer.clear();
            let bytes_read = reader.read_until(b'\n', &mut buffer).with_context(|| {
                format!("Failed to read line {} of {}", line_number + 1, self.io.input.display())
            })?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            let line = strip_line_ending(&buffer);
            if is_skippable(line) {
                continue;
            }

            // Fail fast on a grouping that does not fit the input
            if !checked_samples {
                let samples = std::str::from_utf8(line)
                    .ok()
                    .and_then(|text| processor.parser().sample_count(&split_fields(text)).ok());
                if let Some(samples) = samples {
                    processor.check_sample_count(samples).with_context(|| {
                        format!("Sample groups do not fit the input at line {line_number}")
                    })?;
                    checked_samples = true;
                }
            }

            batch.push((line_number, line.to_vec()));
            if batch.len() >= self.threading.batch_size {
                sink.process_batch(&pool, &processor, &batch)?;
                batch.clear();
            }
        }
        sink.process_batch(&pool, &processor, &batch)?;

        let OutcomeSink { mut output, rejects, mut metrics, progress } = sink;
        output.flush().with_context(|| format!("Failed to write {}", self.io.output.display()))?;
        if let Some(rejects) = rejects {
            rejects.finish()?;
        }
        progress.log_final();

        metrics.finalize();
        log_pileup_summary(&metrics);
        if let Some(path) = &self.metrics {
            write_metrics_auto(path, &[metrics.clone()])?;
            info!("Wrote metrics to {}", path.display());
        }

        timer.log_completion(metrics.total_loci);
        Ok(())
    }
}

/// Destinations for the outcomes of processed lines.
struct OutcomeSink {
    output: Box<dyn Write + Send>,
    rejects: Option<RejectsWriter>,
    metrics: PileupMetrics,
    progress: ProgressTracker,
}

impl OutcomeSink {
    /// Processes `batch` in parallel and consumes the outcomes in input order.
    fn process_batch(
        &mut self,
        pool: &rayon::ThreadPool,
        processor: &LocusProcessor,
        batch: &[(u64, Vec<u8>)],
    ) -> Result<()> {
        let outcomes: Vec<_> = pool.install(|| {
            batch
                .par_iter()
                .map(|&(line_number, ref line)| {
                    (line_number, processor.process_bytes(line, line_number))
                })
                .collect()
        });

        for (line_number, outcome) in outcomes {
            let outcome =
                outcome.with_context(|| format!("Failed to process line {line_number}"))?;
            self.consume(outcome)?;
        }
        Ok(())
    }

    fn consume(&mut self, outcome: LocusOutcome) -> Result<()> {
        match outcome {
            LocusOutcome::Retained(stats) => {
                writeln!(self.output, "{stats}").context("Failed to write statistics row")?;
                self.metrics.add_retained();
                self.progress.log_if_needed(1, stats.locus_id());
            }
            LocusOutcome::Rejected { locus, reason, detail } => {
                info!("Rejected {locus}: {reason} ({detail})");
                if let Some(rejects) = self.rejects.as_mut() {
                    rejects.write(&locus, reason)?;
                }
                self.metrics.add_rejection(reason);
                self.progress.log_if_needed(1, &locus);
            }
        }
        Ok(())
    }
}

/// Tab-separated table of rejected loci.
struct RejectsWriter {
    path: PathBuf,
    writer: Box<dyn Write + Send>,
}

impl RejectsWriter {
    fn new(path: &PathBuf) -> Result<Self> {
        let mut writer = open_output(path)?;
        writeln!(writer, "locus\treason")
            .with_context(|| format!("Failed to write rejects: {}", path.display()))?;
        Ok(Self { path: path.clone(), writer })
    }

    fn write(&mut self, locus: &str, reason: RejectionReason) -> Result<()> {
        writeln!(self.writer, "{locus}\t{}", reason.key())
            .with_context(|| format!("Failed to write rejects: {}", self.path.display()))
    }

    fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to write rejects: {}", self.path.display()))
    }
}

/// Removes a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Blank lines and `#` comment lines carry no locus.
fn is_skippable(line: &[u8]) -> bool {
    let trimmed = line.trim_ascii();
    trimmed.is_empty() || trimmed.starts_with(b"#")
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if is_std_stream(path) {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, std::io::stdin())));
    }
    let fgio = Io::new(COMPRESSION_LEVEL, BUFFER_SIZE);
    let path = path.to_path_buf();
    fgio.new_reader(&path).with_context(|| format!("Failed to open input: {}", path.display()))
}

fn open_output(path: &Path) -> Result<Box<dyn Write + Send>> {
    if is_std_stream(path) {
        return Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, std::io::stdout())));
    }
    let fgio = Io::new(COMPRESSION_LEVEL, BUFFER_SIZE);
    let path = path.to_path_buf();
    let writer = fgio
        .new_writer(&path)
        .with_context(|| format!("Failed to create output: {}", path.display()))?;
    Ok(Box::new(writer))
}
