//! End-to-end tests for the pde-ingest binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pde_ingest() -> Command {
    let mut cmd = Command::cargo_bin("pde-ingest").unwrap();
    cmd.env_remove("PDE_RULES_FILE")
        .env_remove("PDE_PREVIEW_ROWS")
        .env_remove("PDE_ALLOWED_EXTENSIONS")
        .env_remove("PDE_MAX_INPUT_BYTES")
        .env_remove("PDE_OUTPUT_PREFIX")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT")
        .env_remove("LOG_FORMAT")
        .env_remove("LOG_FILTER");
    cmd
}

#[test]
fn test_enrich_prints_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("parts.csv");
    fs::write(&input, "part_number,description\nMOT-5HP,motor\nXYZ,\n").unwrap();

    pde_ingest()
        .args(["enrich", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enriched 2 of 2 products (7 new fields)"));

    assert!(dir.path().join("enriched_parts.csv").exists());
}

#[test]
fn test_enrich_json_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("parts.csv");
    let output = dir.path().join("result.csv");
    fs::write(&input, "part_number,description\nRLY-24V,relay\n").unwrap();

    let assert = pde_ingest()
        .args(["enrich", "--json", "--preview", "1", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is not JSON");
    assert_eq!(report["success"], true);
    assert_eq!(report["stats"]["total_products"], 1);
    assert_eq!(report["stats"]["enriched_products"], 1);
    assert_eq!(report["preview"][0]["voltage"], "24");
    assert_eq!(report["preview"][0]["category"], "Relay");
    assert!(output.exists());
}

#[test]
fn test_enrich_rejects_pdf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("manual.pdf");
    fs::write(&input, "%PDF-1.4").unwrap();

    pde_ingest()
        .args(["enrich", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File type not allowed"));
}

#[test]
fn test_enrich_missing_input() {
    pde_ingest()
        .args(["enrich", "--input", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_rules_prints_builtin_set() {
    let assert = pde_ingest().arg("rules").assert().success();

    let rules: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(rules["attributes"][0]["name"], "voltage");
    assert_eq!(rules["categories"][0]["label"], "Motor");
    assert_eq!(rules["categories"].as_array().unwrap().len(), 10);
}

#[test]
fn test_custom_rules_file() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"{"categories": [{"label": "Hose", "keywords": ["HOSE"]}]}"#,
    )
    .unwrap();
    let input = dir.path().join("parts.csv");
    fs::write(&input, "part_number,description\nH-12,garden hose\n").unwrap();

    let assert = pde_ingest()
        .args(["enrich", "--json", "--input"])
        .arg(&input)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["preview"][0]["category"], "Hose");
}

#[test]
fn test_rules_rejects_bad_pattern() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"{"attributes": [{"name": "voltage", "pattern": "(\\d+V"}]}"#,
    )
    .unwrap();

    pde_ingest()
        .args(["rules", "--rules"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern for 'voltage'"));
}

#[test]
fn test_invalid_log_level_is_reported() {
    pde_ingest()
        .env("LOG_LEVEL", "loud")
        .arg("rules")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: invalid logging configuration: Invalid log level: loud",
        ));
}

#[test]
fn test_invalid_log_filter_is_reported() {
    pde_ingest()
        .env("LOG_FILTER", "pde_ingest=loud")
        .arg("rules")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to parse filter directive"));
}
