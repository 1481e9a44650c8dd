//! Integration tests for the ruin CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ruin() -> Command {
    Command::cargo_bin("ruin").unwrap()
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_district_table() {
    ruin()
        .args(["generate", "--seed", "42", "--size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Business District A1"))
        .stdout(predicate::str::contains("Unique Maps"))
        .stdout(predicate::str::contains("The Sewers Thing"))
        .stderr(predicate::str::contains("Creating districts"));
}

#[test]
fn generate_json_to_stdout() {
    let output = ruin()
        .args(["generate", "--size", "2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["seed"], 42);
    assert_eq!(json["districts"].as_array().unwrap().len(), 4);
    assert_eq!(json["districts"][0]["kind"], "business");
    assert_eq!(json["unique_actors"].as_array().unwrap().len(), 6);
    assert!(json["player"].is_object());
}

#[test]
fn generate_is_deterministic() {
    let run = || {
        ruin()
            .args(["generate", "--seed", "7", "--size", "2", "--json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    ruin()
        .args(["generate", "--size", "2", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let content = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["size"], 2);
}

#[test]
fn generate_rejects_tiny_world() {
    ruin()
        .args(["generate", "--size", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("world size 1"));
}

#[test]
fn generate_rejects_bad_exit_chance() {
    ruin()
        .args(["generate", "--exit-chance", "150"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// map
// ---------------------------------------------------------------------------

#[test]
fn map_renders_street() {
    let output = ruin()
        .args(["map", "0", "0", "--size", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(rows.len(), 50);
    assert!(rows.iter().all(|r| r.chars().count() == 50));
    assert!(stdout.contains('#'));
    assert!(stdout.contains('>'));
}

#[test]
fn map_renders_subway_on_middle_row() {
    ruin()
        .args(["map", "1", "1", "--size", "2", "--layer", "subway"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subway"));
}

#[test]
fn map_without_subway_fails() {
    ruin()
        .args(["map", "0", "0", "--size", "2", "--layer", "subway"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no subway map"));
}

#[test]
fn map_outside_grid_fails() {
    ruin()
        .args(["map", "5", "5", "--size", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no district at (5,5)"));
}
