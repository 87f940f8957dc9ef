// End-to-end CLI tests over temporary input fixtures

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Matrix where TF1 covers exactly the positive transactions
const MATRIX: &str = "#gene,TF1,TF2\n\
g1,1,0\n\
g2,1,0\n\
g3,1,0\n\
g4,1,0\n\
g5,0,1\n\
g6,0,1\n\
g7,0,0\n\
g8,0,0\n";

const OUTCOMES: &str = "g1,1\ng2,1\ng3,1\ng4,1\ng5,0\ng6,0\ng7,0\ng8,0\n";

fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_text_report_finds_enriched_combination() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture(OUTCOMES);

    Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("0.05")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- results ---"))
        .stdout(predicate::str::contains("Correction factor: 1"))
        .stdout(predicate::str::contains("# of significant: 1"))
        .stdout(predicate::str::contains("TF1"));
}

#[test]
fn test_json_report_is_valid_json() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture(OUTCOMES);

    let output = Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("0.05")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["lambda_star"], 4);
    assert_eq!(parsed["correction_factor"], 1);
    assert_eq!(parsed["significant"][0]["combination"][0], "TF1");
}

#[test]
fn test_u_test_method_accepts_real_outcomes() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture("g1,2.5\ng2,3.1\ng3,2.9\ng4,3.4\ng5,0.4\ng6,0.2\ng7,0.8\ng8,0.5\n");

    Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("0.05")
        .arg("-p")
        .arg("u-test")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- results ---"));
}

#[test]
fn test_missing_input_file_fails() {
    let outcomes = write_fixture(OUTCOMES);

    Command::cargo_bin("cribar")
        .unwrap()
        .arg("/nonexistent/matrix.csv")
        .arg(outcomes.path())
        .arg("0.05")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_invalid_alpha_fails() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture(OUTCOMES);

    Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("significance level"));
}

#[test]
fn test_unknown_method_rejected_at_parse() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture(OUTCOMES);

    Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("0.05")
        .arg("-p")
        .arg("anova")
        .assert()
        .failure();
}

#[test]
fn test_non_binary_outcome_rejected_for_fisher() {
    let matrix = write_fixture(MATRIX);
    let outcomes = write_fixture("g1,1\ng2,0.7\ng3,1\ng4,1\ng5,0\ng6,0\ng7,0\ng8,0\n");

    Command::cargo_bin("cribar")
        .unwrap()
        .arg(matrix.path())
        .arg(outcomes.path())
        .arg("0.05")
        .assert()
        .failure()
        .stderr(predicate::str::contains("0/1 outcomes"));
}
