//! Configuration errors stop the run with a non-zero exit status.

use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::{COMP_LOCUS, run_stats, run_stats_default_groups, write_pileup};

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("missing.pileup");
    let output = temp_dir.path().join("output.tsv");

    let result = run_stats_default_groups(&input, &output, &[]);
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("does not exist"), "stderr: {}", stderr_of(&result));
}

#[rstest]
#[case(&["-g", "0,1"], "expected exactly 2 groups")]
#[case(&["-g", "0", "-g", "1", "-g", "2"], "expected exactly 2 groups")]
#[case(&["-g", "0,1", "-g", "1,2"], "listed more than once")]
fn test_invalid_grouping(#[case] groups: &[&str], #[case] expected: &str) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let mut args = vec!["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()];
    args.extend_from_slice(groups);
    let result = run_stats(&args);

    assert!(!result.status.success());
    let stderr = stderr_of(&result);
    assert!(stderr.contains("Invalid sample grouping"), "stderr: {stderr}");
    assert!(stderr.contains(expected), "stderr: {stderr}");
}

#[test]
fn test_sample_index_out_of_range() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let result = run_stats(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-g",
        "0,1",
        "-g",
        "2,4",
    ]);

    assert!(!result.status.success());
    let stderr = stderr_of(&result);
    assert!(stderr.contains("Sample index 4 is not present"), "stderr: {stderr}");
    assert!(stderr.contains("line 1"), "stderr: {stderr}");
}

#[rstest]
#[case(&["--quality-offset", "40"])]
#[case(&["--min-base-frequency", "1.5"])]
#[case(&["--min-base-frequency", "-0.1"])]
#[case(&["--threads", "0"])]
#[case(&["--batch-size", "0"])]
#[case(&["--min-base-quality", "300"])]
fn test_invalid_thresholds(#[case] extra: &[&str]) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let result = run_stats_default_groups(&input, &output, extra);
    assert!(!result.status.success(), "{extra:?} should be rejected");
}

#[test]
fn test_invalid_group_value() {
    let result = run_stats(&["-i", "-", "-o", "-", "-g", "0,a", "-g", "1"]);
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("is not a sample index"));
}

#[test]
fn test_malformed_lines_do_not_fail_the_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    write_pileup(
        &input,
        &[
            "chr1".to_string(),
            "chr1\t2\tN\tten\tAAAA\tIIII\t4\tAAAA\tIIII\t4\tAAAA\tIIII\t4\tAAAA\tIIII".to_string(),
            COMP_LOCUS.to_string(),
        ],
    );

    let result = run_stats_default_groups(&input, &output, &[]);
    assert!(result.status.success(), "stderr: {}", stderr_of(&result));

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("comp102583_c0_seq1_locus667\t"));
}

#[test]
fn test_undecodable_line_is_rejected_and_the_run_continues() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let output = temp_dir.path().join("output.tsv");
    let rejects = temp_dir.path().join("rejects.tsv");

    let mut content = b"chr1\t1\tN\t4\tAAAA\tII\xffI".to_vec();
    for _ in 0..3 {
        content.extend_from_slice(b"\t4\tAAAA\tIIII");
    }
    content.push(b'\n');
    content.extend_from_slice(COMP_LOCUS.as_bytes());
    content.push(b'\n');
    std::fs::write(&input, content).expect("Failed to write pileup");

    let result =
        run_stats_default_groups(&input, &output, &["--rejects", rejects.to_str().unwrap()]);
    assert!(result.status.success(), "stderr: {}", stderr_of(&result));

    let rows = std::fs::read_to_string(&output).unwrap();
    assert_eq!(rows.lines().count(), 1);
    assert!(rows.starts_with("comp102583_c0_seq1_locus667\t"));

    let rejected = std::fs::read_to_string(&rejects).unwrap();
    assert_eq!(rejected, "locus\treason\nline 1\tmalformed_record\n");
}

#[test]
fn test_rejects_and_output_cannot_share_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    write_pileup(&input, &[COMP_LOCUS.to_string()]);

    let result = run_stats(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        "-",
        "--rejects",
        "-",
        "-g",
        "0,1",
        "-g",
        "2,3",
    ]);
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("cannot both be written to stdout"));
    assert!(result.stdout.is_empty());
}
