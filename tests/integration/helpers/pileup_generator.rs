//! Builders for small pileup files and helpers to run the binary on them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The four-sample locus used throughout the unit tests.
pub const COMP_LOCUS: &str = "comp102583_c0_seq1\t667\tN\t\
    34\tAAAAAAAAAAAAAAAAAaaaaaaaaaaaaaaaaa\tB::D0DDBBDBDDDDDD3DDD5DDD>@DBDDDDD\t\
    14\tAAAAAAAaaaaaaa\tDDDDDBBDDDDDDD\t\
    40\tAAAAAAAAAAAAAAAAAAAAaaaaaaaaaaaaaaaaaaaa\tDD65DDBDDDDDDDDD86BB#DDDDDDDBDDDDD@DD;D9\t\
    30\tAAAAAAAAAAAAAAAaaaaaaacaaaaaaa\tDD6DD@DDBDD8DBDDDD5DDD#DDDBDDD";

/// One sample's depth, bases and qualities.
pub struct SampleSpec {
    pub bases: String,
    pub quals: String,
}

impl SampleSpec {
    /// `n` copies of `base`, all at Q40 in Phred+33.
    pub fn uniform(base: char, n: usize) -> Self {
        Self { bases: base.to_string().repeat(n), quals: "I".repeat(n) }
    }

    pub fn new(bases: &str, quals: &str) -> Self {
        Self { bases: bases.to_string(), quals: quals.to_string() }
    }
}

/// Formats a pileup line with the declared depth taken from the quality string.
pub fn pileup_line(chrom: &str, pos: u64, samples: &[SampleSpec]) -> String {
    let mut fields = vec![chrom.to_string(), pos.to_string(), "N".to_string()];
    for sample in samples {
        fields.push(sample.quals.len().to_string());
        fields.push(sample.bases.clone());
        fields.push(sample.quals.clone());
    }
    fields.join("\t")
}

/// A line with four samples of `depth` bases each, all `base`.
pub fn uniform_line(chrom: &str, pos: u64, base: char, depth: usize) -> String {
    let samples: Vec<SampleSpec> = (0..4).map(|_| SampleSpec::uniform(base, depth)).collect();
    pileup_line(chrom, pos, &samples)
}

/// Writes `lines` to `path`, one per line.
pub fn write_pileup(path: &Path, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).expect("Failed to write pileup");
}

/// Runs `pilecall stats` with the given arguments.
pub fn run_stats(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pilecall"))
        .arg("stats")
        .args(args)
        .output()
        .expect("Failed to run stats command")
}

/// Runs `pilecall stats -i <input> -o <output> -g 0,1 -g 2,3` plus `extra`.
pub fn run_stats_default_groups(input: &Path, output: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-g",
        "0,1",
        "-g",
        "2,3",
    ];
    args.extend_from_slice(extra);
    run_stats(&args)
}

/// Reads an output table as rows of fields.
pub fn read_rows(path: &PathBuf) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}
