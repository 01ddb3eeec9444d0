use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATASET: &str = r#"[
  {"QUOTATION NO": "25-0101", "QUOTATION DATE": "05-Jan-25", "CLIENT": "Acme", "NEW/OLD": "NEW",
   "TOTAL AMOUNT": "1,000.00", "SALES  PERSON": "Rahul", "STATUS": "INVOICED", "INVOICE NO": "INV-7"},
  {"QUOTATION NO": "25-0102", "QUOTATION DATE": "12-Feb-25", "CLIENT": "Beta, Ltd", "NEW/OLD": "OLD",
   "TOTAL AMOUNT": "250.50", "SALES  PERSON": "Meera", "STATUS": "PENDING"}
]"#;

/// Temp dir holding an empty config (defaults) and a small dataset.
fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let dataset = dir.path().join("quotations.json");
    fs::write(&config, "{}").unwrap();
    fs::write(&dataset, DATASET).unwrap();
    (dir, config, dataset)
}

fn quotr(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quotr").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn list_json_from_dataset_file() {
    let (_dir, config, dataset) = fixture();

    let output = quotr(&config)
        .args(["list", "--format", "json", "--dataset"])
        .arg(&dataset)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[1]["CLIENT"], "Beta, Ltd");
}

#[test]
fn list_filters_by_status() {
    let (_dir, config, dataset) = fixture();

    quotr(&config)
        .args(["list", "--status", "invoiced", "--format", "csv", "--dataset"])
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("25-0101"))
        .stdout(predicate::str::contains("25-0102").not());
}

#[test]
fn list_rejects_unknown_status() {
    let (_dir, config, dataset) = fixture();

    quotr(&config)
        .args(["list", "--status", "LOST", "--dataset"])
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status filter"));
}

#[test]
fn stats_over_bundled_dataset() {
    let (_dir, config, _) = fixture();

    let output = quotr(&config)
        .args(["stats", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["count"], 12);
    assert_eq!(stats["invoicedCount"], 4);
    assert_eq!(stats["regretCount"], 2);
}

#[test]
fn stats_text_with_date_range() {
    let (_dir, config, dataset) = fixture();

    quotr(&config)
        .args(["stats", "--from", "2025-02-01", "--facets", "--dataset"])
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quotations:   1"))
        .stdout(predicate::str::contains("Total amount: 250.50"))
        .stdout(predicate::str::contains("Acme, Beta, Ltd"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    quotr(&config).args(["config", "path"]).assert().success().stdout(
        predicate::str::contains("not created").and(predicate::str::contains("quotr config init")),
    );

    quotr(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());
    quotr(&config).args(["config", "init"]).assert().failure();

    quotr(&config)
        .args(["config", "get", "gateway.model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("google/gemini-2.5-flash"));

    quotr(&config)
        .args(["config", "set", "dataset.page_size", "10"])
        .assert()
        .success();
    quotr(&config)
        .args(["config", "get", "dataset.page_size"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10"));

    quotr(&config)
        .args(["config", "set", "dataset.page_size", "many"])
        .assert()
        .failure();
    quotr(&config)
        .args(["config", "set", "gateway.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn extract_rejects_unsupported_file() {
    let (dir, config, _) = fixture();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "not an image").unwrap();

    quotr(&config)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported image type"));
}

#[test]
fn extract_without_credential_fails() {
    let (dir, config, _) = fixture();
    fs::write(&config, r#"{"gateway": {"api_key_env": "QUOTR_CLI_TEST_UNSET_KEY"}}"#).unwrap();
    let input = dir.path().join("quote.png");
    fs::write(&input, [0x89, b'P', b'N', b'G']).unwrap();

    quotr(&config)
        .arg("extract")
        .arg(&input)
        .env_remove("QUOTR_CLI_TEST_UNSET_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUOTR_CLI_TEST_UNSET_KEY is not configured"));
}
