//! Integration tests for the stats command.

use std::fs;
use tempfile::TempDir;

use crate::helpers::{
    COMP_LOCUS, SampleSpec, pileup_line, read_rows, run_stats_default_groups, uniform_line,
    write_pileup,
};

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

#[test]
fn test_stats_single_locus() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let result = run_stats_default_groups(&input, &output, &[]);
    assert!(result.status.success(), "stats failed: {}", String::from_utf8_lossy(&result.stderr));

    let rows = read_rows(&output);
    assert_eq!(
        rows,
        vec![row(&[
            "comp102583_c0_seq1_locus667",
            "46",
            "46",
            "1.0",
            "|",
            "68",
            "68",
            "1.0",
            "|",
            "32",
            "32",
            "14",
            "14",
            "|",
            "39",
            "39",
            "29",
            "29",
        ])]
    );
}

#[test]
fn test_stats_without_quality_filtering() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let result = run_stats_default_groups(&input, &output, &["--min-base-quality", "0"]);
    assert!(result.status.success());

    let rows = read_rows(&output);
    assert_eq!(
        rows[0],
        row(&[
            "comp102583_c0_seq1_locus667",
            "48",
            "48",
            "1.0",
            "|",
            "69",
            "70",
            "0.9857142857142857",
            "|",
            "34",
            "34",
            "14",
            "14",
            "|",
            "40",
            "40",
            "29",
            "30",
        ])
    );
}

#[test]
fn test_stats_rejections_metrics_and_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    let rejects = temp_dir.path().join("rejects.tsv");
    let metrics = temp_dir.path().join("metrics.txt");

    let filtered: Vec<SampleSpec> =
        (0..4).map(|_| SampleSpec::new("AAAAAAAAAAAA", "IIIIIII#####")).collect();
    let split: Vec<SampleSpec> =
        (0..4).map(|_| SampleSpec::new("AAAAAACCCCCC", "IIIIIIIIIIII")).collect();
    let lines = vec![
        "# generated for testing".to_string(),
        uniform_line("chr1", 1, 'A', 12),
        uniform_line("chr1", 2, 'A', 5),
        pileup_line("chr1", 3, &filtered),
        String::new(),
        pileup_line("chr1", 4, &split),
        "chr1\t5\tN\t12\tAAAA".to_string(),
        uniform_line("chr2", 10, 'g', 15),
    ];
    write_pileup(&input, &lines);

    let result = run_stats_default_groups(
        &input,
        &output,
        &["--rejects", rejects.to_str().unwrap(), "--metrics", metrics.to_str().unwrap()],
    );
    assert!(result.status.success(), "stats failed: {}", String::from_utf8_lossy(&result.stderr));

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        row(&[
            "chr1_locus1", "24", "24", "1.0", "|", "24", "24", "1.0", "|", "12", "12", "12", "12",
            "|", "12", "12", "12", "12",
        ])
    );
    assert_eq!(rows[1][0], "chr2_locus10");
    assert_eq!(rows[1][1..4], ["30", "30", "1.0"]);

    let rejected = read_rows(&rejects);
    assert_eq!(
        rejected,
        vec![
            row(&["locus", "reason"]),
            row(&["chr1_locus2", "insufficient_nominal_depth"]),
            row(&["chr1_locus3", "insufficient_filtered_depth"]),
            row(&["chr1_locus4", "no_consensus"]),
            row(&["chr1_locus5", "malformed_record"]),
        ]
    );

    let metrics = read_rows(&metrics);
    assert_eq!(metrics.len(), 2);
    let value = |name: &str| -> String {
        let column = metrics[0].iter().position(|h| h == name).expect("missing metric column");
        metrics[1][column].clone()
    };
    assert_eq!(value("total_loci"), "6");
    assert_eq!(value("retained_loci"), "2");
    assert_eq!(value("rejected_loci"), "4");
    assert_eq!(value("rejected_insufficient_nominal_depth"), "1");
    assert_eq!(value("rejected_insufficient_filtered_depth"), "1");
    assert_eq!(value("rejected_no_consensus"), "1");
    assert_eq!(value("rejected_malformed_record"), "1");
    assert_eq!(value("fraction_retained"), "0.333333");

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Rejected chr1_locus4"), "rejections should be logged: {stderr}");
}

#[test]
fn test_stats_phred64_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");

    // 'h' is Q40 and 'B' is Q2 in Phred+64
    let samples: Vec<SampleSpec> =
        (0..4).map(|_| SampleSpec::new("TTTTTTTTTTTTA", "hhhhhhhhhhhhB")).collect();
    write_pileup(&input, &[pileup_line("chrM", 42, &samples)]);

    let result = run_stats_default_groups(&input, &output, &["--quality-offset", "64"]);
    assert!(result.status.success(), "stats failed: {}", String::from_utf8_lossy(&result.stderr));

    let rows = read_rows(&output);
    assert_eq!(rows[0][..4], ["chrM_locus42", "24", "24", "1.0"]);
}

#[test]
fn test_stats_parallel_output_matches_serial() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let serial = temp_dir.path().join("serial.tsv");
    let parallel = temp_dir.path().join("parallel.tsv");

    let lines: Vec<String> = (1..=60)
        .map(|pos| {
            let depth = 8 + (pos as usize % 7);
            let base = ['A', 'C', 'G', 'T'][pos as usize % 4];
            uniform_line("chr3", pos, base, depth)
        })
        .collect();
    write_pileup(&input, &lines);

    let result = run_stats_default_groups(&input, &serial, &[]);
    assert!(result.status.success());
    let result =
        run_stats_default_groups(&input, &parallel, &["--threads", "4", "--batch-size", "7"]);
    assert!(result.status.success());

    let serial_content = fs::read_to_string(&serial).unwrap();
    let parallel_content = fs::read_to_string(&parallel).unwrap();
    assert!(!serial_content.is_empty());
    assert_eq!(serial_content, parallel_content);

    let positions: Vec<String> =
        read_rows(&parallel).into_iter().map(|row| row[0].clone()).collect();
    let mut sorted = positions.clone();
    sorted.sort_by_key(|id| id.trim_start_matches("chr3_locus").parse::<u64>().unwrap());
    assert_eq!(positions, sorted);
}

#[test]
fn test_stats_groups_can_skip_and_reorder_samples() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");

    let samples = [
        SampleSpec::uniform('C', 10),
        SampleSpec::uniform('C', 11),
        SampleSpec::uniform('C', 12),
        SampleSpec::uniform('C', 13),
    ];
    write_pileup(&input, &[pileup_line("chr1", 7, &samples)]);

    let result = crate::helpers::run_stats(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-g",
        "3",
        "-g",
        "1,0",
    ]);
    assert!(result.status.success());

    let rows = read_rows(&output);
    assert_eq!(
        rows[0],
        row(&[
            "chr1_locus7", "13", "13", "1.0", "|", "21", "21", "1.0", "|", "13", "13", "|", "11",
            "11", "10", "10",
        ])
    );
}
