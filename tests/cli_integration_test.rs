//! End-to-end tests that run the `bowtie` binary.

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

/// A command isolated from any project or user configuration on the host.
fn bowtie(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bowtie"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("BOWTIE_LOG")
        .env_remove("BOWTIE_CONFIG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_compute_json_reports_bootstrap_mrr() {
    let temp_dir = TempDir::new().unwrap();
    let output = bowtie(&temp_dir)
        .args(["compute", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["metrics"]["mrr"]["mrr"], 87.890625);
    assert_eq!(json["metrics"]["stages"][1], 250.0);
}

#[test]
fn test_compute_flags_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let output = bowtie(&temp_dir)
        .args(["compute", "--leads", "2000", "--fee", "40", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["metrics"]["mrr"]["mrr"], 234.375);
}

#[test]
fn test_compute_rejects_wrong_rate_count() {
    let temp_dir = TempDir::new().unwrap();
    bowtie(&temp_dir)
        .args(["compute", "--rates", "10,20"])
        .assert()
        .failure();
}

#[test]
fn test_compare_terminal_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = bowtie(&temp_dir)
        .args(["compare", "--b-fee", "40"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("MRR Difference"), "stdout: {stdout}");
    assert!(stdout.contains("$29.30"), "stdout: {stdout}");
}

#[test]
fn test_compare_writes_markdown_file() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("out").join("compare.md");

    bowtie(&temp_dir)
        .args(["compare", "--a-leads", "0", "-f", "markdown", "-o"])
        .arg(&report)
        .assert()
        .success();

    let contents = fs::read_to_string(&report).unwrap();
    assert!(contents.contains("n/a"));
}

#[test]
fn test_config_file_drives_scenarios() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".bowtie.toml"),
        indoc! {r#"
            [scenario_a]
            lead_count = 2000
        "#},
    )
    .unwrap();

    let output = bowtie(&temp_dir)
        .args(["compute", "-f", "json"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["metrics"]["mrr"]["mrr"], 175.78125);
}

#[test]
fn test_validate_strict_fails_on_out_of_range_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".bowtie.toml"),
        indoc! {r#"
            [scenario_b]
            conversion_rates = [120, 25, 25, 25]
        "#},
    )
    .unwrap();

    bowtie(&temp_dir).args(["validate"]).assert().success();
    bowtie(&temp_dir)
        .args(["validate", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_validate_strict_passes_on_defaults() {
    let temp_dir = TempDir::new().unwrap();
    bowtie(&temp_dir)
        .args(["validate", "--strict"])
        .assert()
        .success();
}

#[test]
fn test_init_creates_config_once() {
    let temp_dir = TempDir::new().unwrap();

    bowtie(&temp_dir).arg("init").assert().success();
    assert!(temp_dir.path().join(".bowtie.toml").exists());

    bowtie(&temp_dir).arg("init").assert().failure();
    bowtie(&temp_dir).args(["init", "--force"]).assert().success();
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    bowtie(&temp_dir)
        .args(["--config", "missing.toml", "compute"])
        .assert()
        .failure();
}
