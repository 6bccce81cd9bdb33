//! Integration tests for the exposure ledger CLI.
//!
//! These tests run the actual binary and verify output against expected report files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("exposure-ledger").unwrap();
    cmd.env_remove("EXPOSURE_EPOCH_YEAR").env("RUST_LOG", "off");
    cmd
}

/// Run the binary with the given input file and return stdout
fn run_ledger(input_file: &str) -> String {
    let assert = command().arg("--path").arg(input_file).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn assert_report_matches(sample: &str, expected: &str) {
    let output = run_ledger(&test_data_path(sample));
    let expected = fs::read_to_string(test_data_path(expected)).unwrap();

    let output_lines: Vec<&str> = output.lines().map(str::trim_end).collect();
    let expected_lines: Vec<&str> = expected.lines().map(str::trim_end).collect();

    assert_eq!(output_lines, expected_lines);
}

#[test]
fn test_sample_a_register_and_settle() {
    assert_report_matches("sample_a.jsonl", "expected_a.txt");
}

#[test]
fn test_sample_b_full_lifecycle() {
    assert_report_matches("sample_b_lifecycle.jsonl", "expected_b.txt");
}

#[test]
fn test_sample_c_rejections() {
    assert_report_matches("sample_c_rejections.jsonl", "expected_c.txt");
}

#[test]
fn test_sample_d_overpayment_subtracts_paid_total() {
    assert_report_matches("sample_d_overpayment.jsonl", "expected_d.txt");
}

#[test]
fn test_missing_file_error() {
    command()
        .arg("--path")
        .arg("nonexistent.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn test_year_flag_changes_accepted_epoch() {
    let output = command()
        .arg("--path")
        .arg(test_data_path("sample_a.jsonl"))
        .arg("--year")
        .arg("2023")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("JAN\t0.00\t0.00"));
    assert!(text.contains("Lines skipped: 2"));
}

#[test]
fn test_year_from_environment() {
    command()
        .env("EXPOSURE_EPOCH_YEAR", "2021")
        .arg("--path")
        .arg(test_data_path("sample_c_rejections.jsonl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("MAY\t10.00\t10.00"));
}

#[test]
fn test_json_format() {
    let output = command()
        .arg("--path")
        .arg(test_data_path("sample_b_lifecycle.jsonl"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["skipped"], 0);
    assert_eq!(value["invoices"], 3);
    assert_eq!(value["closing_exposure"], "1000");
    assert_eq!(value["months"][2]["peak"], "1275.00");
    assert_eq!(value["series"].as_array().unwrap().len(), 7);
}

#[test]
fn test_series_out_writes_csv() {
    let dir = TempDir::new().unwrap();
    let series_path = dir.path().join("series.csv");

    command()
        .arg("--path")
        .arg(test_data_path("sample_d_overpayment.jsonl"))
        .arg("--series-out")
        .arg(&series_path)
        .assert()
        .success();

    let csv = fs::read_to_string(&series_path).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(
        rows,
        vec![
            "index,month,exposure",
            "0,JUL,100",
            "1,JUL,600",
            "2,JUL,500",
            "3,AUG,380",
        ]
    );
}

#[test]
fn test_skipped_lines_are_logged_at_warn() {
    let mut cmd = Command::cargo_bin("exposure-ledger").unwrap();
    cmd.env_remove("EXPOSURE_EPOCH_YEAR")
        .env("RUST_LOG", "warn")
        .arg("--path")
        .arg(test_data_path("sample_c_rejections.jsonl"))
        .assert()
        .success()
        .stderr(predicate::str::contains("resent record"))
        .stderr(predicate::str::contains("un-parsable amount x"));
}
