//! Reading the pileup from stdin and writing the table to stdout.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

use crate::helpers::{COMP_LOCUS, read_rows, uniform_line, write_pileup};

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pilecall"))
        .arg("stats")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn stats command");

    child
        .stdin
        .take()
        .expect("stdin was not piped")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");
    child.wait_with_output().expect("Failed to wait for stats command")
}

#[test]
fn test_stdin_to_stdout() {
    let input = format!("{}\n{}\n", uniform_line("chr1", 1, 'T', 20), COMP_LOCUS);
    let result = run_with_stdin(&["-i", "-", "-o", "-", "-g", "0,1", "-g", "2,3"], &input);
    assert!(result.status.success(), "stats failed: {}", String::from_utf8_lossy(&result.stderr));

    let stdout = String::from_utf8(result.stdout).unwrap();
    let ids: Vec<&str> =
        stdout.lines().map(|line| line.split('\t').next().unwrap_or_default()).collect();
    assert_eq!(ids, vec!["chr1_locus1", "comp102583_c0_seq1_locus667"]);

    // Logging goes to stderr and never mixes with the table
    assert!(!stdout.contains("Running pilecall"));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Running pilecall"));
}

#[test]
fn test_stdin_matches_file_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.pileup");
    let from_file = temp_dir.path().join("from_file.tsv");
    let from_stdin = temp_dir.path().join("from_stdin.tsv");

    let lines: Vec<String> = (1..=25).map(|pos| uniform_line("chrX", pos, 'C', 12)).collect();
    write_pileup(&input, &lines);

    let result = crate::helpers::run_stats(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        from_file.to_str().unwrap(),
        "-g",
        "0",
        "-g",
        "1,2,3",
    ]);
    assert!(result.status.success());

    let content = std::fs::read_to_string(&input).unwrap();
    let result = run_with_stdin(
        &["-i", "-", "-o", from_stdin.to_str().unwrap(), "-g", "0", "-g", "1,2,3", "-t", "2"],
        &content,
    );
    assert!(result.status.success());

    let rows = read_rows(&from_stdin);
    assert_eq!(rows.len(), 25);
    assert_eq!(rows, read_rows(&from_file));
}

#[test]
fn test_empty_stdin() {
    let result = run_with_stdin(&["-i", "-", "-o", "-", "-g", "0", "-g", "1"], "");
    assert!(result.status.success());
    assert!(result.stdout.is_empty());
}
