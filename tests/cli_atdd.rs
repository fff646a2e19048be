use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` as an assessment and return a command whose HOME points at
/// the same empty temp dir, so no global defaults leak in.
fn setup(content: &str) -> (TempDir, PathBuf, Command) {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("method.toml");
    fs::write(&path, content).expect("assessment should write");
    let mut cmd = Command::cargo_bin("esai").expect("binary should compile");
    cmd.env("HOME", dir.path()).env_remove("RUST_LOG");
    (dir, path, cmd)
}

#[test]
fn score_prints_markdown_report() {
    let (_dir, path, mut cmd) = setup("[inputs]\n17 = \"50\"\n");
    cmd.arg("score")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# ESAI Report"))
        .stdout(predicate::str::contains("Total score: 4.80"))
        .stdout(predicate::str::contains("| 17 | The cost of analysis for each sample | Economy | 50 RMB | 96.00 | 4.80 |"));
}

#[test]
fn score_prints_json_report() {
    let (_dir, path, mut cmd) = setup("[inputs]\n2 = 100\n");
    let output = cmd
        .arg("score")
        .arg(&path)
        .args(["--format", "json"])
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["total"], 1.49);
    assert_eq!(value["principles"]["2"]["raw_score"], 14.9);
    assert_eq!(value["principles"]["2"]["display_text"], "100 mg or µL");
}

#[test]
fn recovered_input_exits_with_warnings() {
    let (_dir, path, mut cmd) = setup("[inputs]\n22 = \"-4\"\n");
    cmd.arg("score")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("negative value -4 reset to 0"))
        .stdout(predicate::str::contains("| 22 |"));
}

#[test]
fn incomplete_principle_eight_exits_with_warnings() {
    let (_dir, path, mut cmd) = setup("[inputs]\n8 = { steps = \"two_or_fewer\" }\n");
    cmd.arg("score")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("automation not selected"));
}

#[test]
fn rejected_weights_block_but_still_report() {
    let (_dir, path, mut cmd) = setup("[inputs]\n17 = \"50\"\n");
    cmd.arg("score")
        .arg(&path)
        .args(["--weights", "0.1,0.2,0.2,0.05,0.05,0.1,0.1,0.25"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("weights must sum to 1.00 (found 1.05)"))
        .stdout(predicate::str::contains("Total score: 4.80"));
}

#[test]
fn missing_weight_fields_are_reported_by_label() {
    let (_dir, path, mut cmd) = setup("");
    cmd.arg("score")
        .arg(&path)
        .args(["--weights", "0.5,0.5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing weight value(s): w3"));
}

#[test]
fn extra_weight_fields_are_rejected() {
    let (_dir, path, mut cmd) = setup("[inputs]\n17 = \"50\"\n");
    cmd.arg("score")
        .arg(&path)
        .args(["--weights", "0.1,0.2,0.2,0.05,0.05,0.1,0.1,0.2,0.3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected 8 weights, found 9"))
        .stdout(predicate::str::contains("Total score: 4.80"));
}

#[test]
fn preset_changes_dimension_scores() {
    let (_dir, path, mut cmd) = setup("[inputs]\n17 = \"50\"\n");
    cmd.arg("score")
        .arg(&path)
        .args(["--preset", "4"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Total score: 9.60"));
}

#[test]
fn missing_assessment_is_runtime_failure() {
    let (dir, _path, mut cmd) = setup("");
    cmd.arg("score")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn unknown_option_key_is_runtime_failure() {
    let (_dir, path, mut cmd) = setup("[inputs]\n1 = \"on_the_moon\"\n");
    cmd.arg("score")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown option 'on_the_moon'"));
}

#[test]
fn global_defaults_apply_beneath_assessment() {
    let (dir, path, mut cmd) = setup("[inputs]\n17 = \"50\"\n");
    let global = dir.path().join(".config/esai");
    fs::create_dir_all(&global).expect("global dir should create");
    fs::write(global.join("config.toml"), "[weights]\npreset = 4\n")
        .expect("global config should write");
    cmd.arg("score")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Total score: 9.60"));
}

#[test]
fn chart_writes_svg_file() {
    let (dir, path, mut cmd) = setup("[inputs]\n1 = \"in_line\"\n[colors]\nend = \"#00ff00\"\n");
    let out = dir.path().join("chart.svg");
    cmd.arg("chart")
        .arg(&path)
        .arg("--output")
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("written:"));
    let svg = fs::read_to_string(&out).expect("svg should be written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("rgb(0,255,0)"));
    assert_eq!(svg.matches("<polygon").count(), 33);
}
