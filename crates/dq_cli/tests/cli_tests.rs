use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the dq binary with no narrative service configured
#[allow(deprecated)]
fn dq() -> Command {
    let mut cmd = Command::cargo_bin("dq").expect("Failed to find dq binary");
    cmd.env_remove("AI_SDK_BASE_URL")
        .env_remove("AI_SDK_USERNAME")
        .env_remove("AI_SDK_PASSWORD")
        .env_remove("DQ_OUTPUT_DIR");
    cmd
}

// ============================================================================
// run command tests
// ============================================================================

#[test]
fn test_run_writes_all_outputs() {
    let out = TempDir::new().unwrap();

    dq()
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.csv"))
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA QUALITY REPORT"))
        .stdout(predicate::str::contains("6 violations found"))
        .stdout(predicate::str::contains("bogus"));

    for name in [
        "cleaned_data.csv",
        "dq_violations.csv",
        "dq_profile.csv",
        "dq_kpis.csv",
        "dq_kpi_summary.json",
    ] {
        assert!(out.path().join(name).exists(), "missing output {}", name);
    }
    assert!(!out.path().join("dq_narrative.md").exists());

    let cleaned = fs::read_to_string(out.path().join("cleaned_data.csv")).unwrap();
    assert!(cleaned.contains("UNKNOWN"));

    let violations = fs::read_to_string(out.path().join("dq_violations.csv")).unwrap();
    assert!(violations.starts_with(
        "row_index,rule_id,column_name,severity,description,reason,value"
    ));
    assert_eq!(violations.lines().count(), 7);
}

#[test]
fn test_run_json_output() {
    let out = TempDir::new().unwrap();

    let assert = dq()
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.csv"))
        .arg("-o")
        .arg(out.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(report["stats"]["rows"], 4);
    assert_eq!(report["stats"]["violations"], 6);
    assert_eq!(report["stats"]["rules_total"], 7);
    assert_eq!(report["stats"]["rules_skipped"], 1);
    assert_eq!(report["kpi_summary"]["total_violations"], 6);
    assert_eq!(report["skipped_rules"][0]["rule_id"], "bogus");
    assert!(report["narrative"].is_null());

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("dq_kpi_summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["total_violations"], 6);
}

#[test]
fn test_run_yaml_rules() {
    let out = TempDir::new().unwrap();

    dq()
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.yml"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 violations found"));
}

#[test]
fn test_run_toml_rules() {
    let out = TempDir::new().unwrap();

    dq()
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.toml"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 violations found"));
}

#[test]
fn test_run_json_rules_custom_fill() {
    let out = TempDir::new().unwrap();

    dq()
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.json"))
        .arg("-o")
        .arg(out.path())
        .arg("--no-narrative")
        .assert()
        .success();

    let cleaned = fs::read_to_string(out.path().join("cleaned_data.csv")).unwrap();
    assert!(cleaned.contains("N/A"));
}

#[test]
fn test_run_output_dir_from_env() {
    let out = TempDir::new().unwrap();

    dq()
        .env("DQ_OUTPUT_DIR", out.path())
        .arg("run")
        .arg(fixture_path("orders.csv"))
        .arg(fixture_path("rules.toml"))
        .assert()
        .success();

    assert!(out.path().join("cleaned_data.csv").exists());
}

#[test]
fn test_run_missing_dataset() {
    let out = TempDir::new().unwrap();

    dq()
        .arg("run")
        .arg("nonexistent.csv")
        .arg(fixture_path("rules.csv"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read dataset"));
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_reports_unusable_rules() {
    dq()
        .arg("check")
        .arg(fixture_path("rules.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("amount_min"))
        .stdout(predicate::str::contains("bogus"))
        .stdout(predicate::str::contains("unsupported rule type 'UNIQUE'"));
}

#[test]
fn test_check_clean_rule_table() {
    dq()
        .arg("check")
        .arg(fixture_path("rules.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All rules can be evaluated"));
}

#[test]
fn test_check_json_output() {
    let assert = dq()
        .arg("check")
        .arg(fixture_path("rules.csv"))
        .arg("-f")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(report["valid"], false);
    assert_eq!(report["rule_count"], 7);
    assert_eq!(report["issues"][0]["rule_id"], "bogus");
    assert_eq!(report["rules"][2]["rule_type"], "IN_LIST");
}

#[test]
fn test_check_invalid_rule_file() {
    dq()
        .arg("check")
        .arg(fixture_path("invalid_rules.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_missing_file() {
    dq()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure();
}

// ============================================================================
// profile command tests
// ============================================================================

#[test]
fn test_profile_text() {
    dq()
        .arg("profile")
        .arg(fixture_path("orders.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("amount"))
        .stdout(predicate::str::contains("float64"))
        .stdout(predicate::str::contains("city"));
}

#[test]
fn test_profile_json() {
    let assert = dq()
        .arg("profile")
        .arg(fixture_path("orders.csv"))
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let profiles: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let profiles = profiles.as_array().unwrap();

    assert_eq!(profiles.len(), 5);
    assert_eq!(profiles[1]["column_name"], "amount");
    assert_eq!(profiles[1]["null_count"], 1);
    assert_eq!(profiles[4]["column_name"], "city");
    assert_eq!(profiles[4]["null_percent"], 25.0);
}

// ============================================================================
// general CLI tests
// ============================================================================

#[test]
fn test_help() {
    dq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Quality Engine CLI"));
}

#[test]
fn test_version() {
    dq().arg("--version").assert().success();
}
