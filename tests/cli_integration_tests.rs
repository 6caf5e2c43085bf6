//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bdew_slp() -> Command {
    let mut cmd = Command::cargo_bin("bdew-slp").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BDEW_SLP_YEAR")
        .env_remove("BDEW_SLP_BUNDESLAND");
    cmd
}

/// Workbook with a cover sheet and an H25 sheet of vertical WT blocks
fn create_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("SLP.xlsx");
    let mut workbook = Workbook::new();

    let cover = workbook.add_worksheet();
    cover.set_name("Deckblatt").unwrap();
    cover.write_string(0, 0, "BDEW Standardlastprofile").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("H25").unwrap();
    for (m, name) in ["Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
        "September", "Oktober", "November", "Dezember"]
    .iter()
    .enumerate()
    {
        let col = m as u16;
        sheet.write_string(0, col, *name).unwrap();
        sheet.write_string(1, col, "WT").unwrap();
        for h in 0..24u32 {
            sheet.write_number(2 + h, col, 2.0).unwrap();
        }
    }

    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    bdew_slp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bdew-slp"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    bdew_slp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bdew-slp"));
}

#[test]
fn test_convert_help_lists_modes() {
    bdew_slp()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("annual_1e6"))
        .stdout(predicate::str::contains("--missing-profile"));
}

#[test]
fn test_convert_requires_arguments() {
    bdew_slp()
        .arg("convert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--xlsx"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_convert_writes_json() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());
    let out = dir.path().join("public/data/bdew_h25_8760.json");

    bdew_slp()
        .arg("convert")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "H25", "--year", "2025", "--bundesland", "rp"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stdout(predicate::str::contains("len=8760"))
        .stdout(predicate::str::contains("sum=1.000000"))
        .stdout(predicate::str::contains("unit=share_of_year"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["bundesland"], "RP");
    assert_eq!(json["profile"], "H25");
    assert_eq!(json["hours"].as_array().unwrap().len(), 8760);
}

#[test]
fn test_convert_from_environment() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());
    let out = dir.path().join("h25.json");

    bdew_slp()
        .env("BDEW_SLP_YEAR", "2024")
        .env("BDEW_SLP_BUNDESLAND", "DE-BY")
        .arg("convert")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "H25", "--normalize", "none", "--source", "test"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("len=8784"))
        .stdout(predicate::str::contains("unit=raw"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["source"], "test");
    assert_eq!(json["year"], 2024);
    assert_eq!(json["hours"][0], 2.0);
}

#[test]
fn test_convert_missing_sheet_lists_available() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());
    let out = dir.path().join("g25.json");

    bdew_slp()
        .arg("convert")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "G25", "--year", "2025", "--bundesland", "RP"])
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("G25"))
        .stderr(predicate::str::contains("Deckblatt"))
        .stderr(predicate::str::contains("H25"));

    assert!(!out.exists());
}

#[test]
fn test_convert_unrecognized_layout() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());

    bdew_slp()
        .arg("convert")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "Deckblatt", "--year", "2025", "--bundesland", "RP"])
        .arg("--out")
        .arg(dir.path().join("x.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Layout detection failed"));
}

#[test]
fn test_convert_rejects_unknown_bundesland() {
    bdew_slp()
        .args(["convert", "--xlsx", "a.xlsx", "--sheet", "H25", "--year", "2025"])
        .args(["--bundesland", "XY", "--out", "a.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("XY"));
}

#[test]
fn test_convert_exact_policy_fails() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());
    let out = dir.path().join("h25.json");

    bdew_slp()
        .arg("convert")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "H25", "--year", "2025", "--bundesland", "RP"])
        .args(["--missing-profile", "exact"])
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 24h profile"));

    assert!(!out.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT / HOLIDAYS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_inspect_lists_sheets() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());

    bdew_slp()
        .arg("inspect")
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deckblatt"))
        .stdout(predicate::str::contains("vertical blocks (12 profiles)"));
}

#[test]
fn test_inspect_sheet_table() {
    let dir = TempDir::new().unwrap();
    let xlsx = create_workbook(dir.path());

    bdew_slp()
        .arg("inspect")
        .arg("--xlsx")
        .arg(&xlsx)
        .args(["--sheet", "H25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dezember"))
        .stdout(predicate::str::contains("48"));
}

#[test]
fn test_holidays_bayern() {
    bdew_slp()
        .args(["holidays", "--year", "2024", "--bundesland", "BY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-30"))
        .stdout(predicate::str::contains("Fronleichnam"))
        .stdout(predicate::str::contains("12 holidays"));
}

#[test]
fn test_holidays_invalid_year() {
    bdew_slp()
        .args(["holidays", "--year", "1000", "--bundesland", "BY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid year"));
}

// ═══════════════════════════════════════════════════════════════════════════
// BATCH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_batch_runs_all_jobs() {
    let dir = TempDir::new().unwrap();
    create_workbook(dir.path());
    let jobs = dir.path().join("jobs.yaml");
    fs::write(
        &jobs,
        r#"
defaults:
  xlsx: SLP.xlsx
  year: 2025
  bundesland: RP
jobs:
  - sheet: H25
    out: out/share.json
  - sheet: H25
    out: out/scaled.json
    normalize: annual_1e6
"#,
    )
    .unwrap();

    bdew_slp()
        .arg("batch")
        .arg(&jobs)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 jobs"))
        .stdout(predicate::str::contains("unit=kWh_per_1e6"));

    assert!(dir.path().join("out/share.json").exists());
    assert!(dir.path().join("out/scaled.json").exists());
}

#[test]
fn test_batch_stops_at_failing_job() {
    let dir = TempDir::new().unwrap();
    create_workbook(dir.path());
    let jobs = dir.path().join("jobs.yaml");
    fs::write(
        &jobs,
        r#"
defaults:
  xlsx: SLP.xlsx
  year: 2025
  bundesland: RP
jobs:
  - sheet: G25
    out: out/g25.json
  - sheet: H25
    out: out/h25.json
"#,
    )
    .unwrap();

    bdew_slp()
        .arg("batch")
        .arg(&jobs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("job 1 (sheet 'G25') failed"));

    assert!(!dir.path().join("out/h25.json").exists());
}
