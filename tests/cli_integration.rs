//! Integration tests for the chillbot CLI.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const LABELS: &str = "cocacola\nperrier\nother\nwater\n";

/// Command isolated from the user's config and environment.
fn chillbot(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("chillbot");
    cmd.env_remove("CHILLBOT_LABELS")
        .env_remove("CHILLBOT_FORMAT")
        .env_remove("CHILLBOT_STORE")
        .env_remove("CHILLBOT_STORE_KEY")
        .env_remove("RUST_LOG")
        .env("CHILLBOT_CONFIG", dir.join("config.toml"));
    cmd
}

fn write_fixture(dir: &Path, frame: &str, count: usize) -> (String, String) {
    let labels = dir.join("labels.txt");
    std::fs::write(&labels, LABELS).unwrap();

    let frames = dir.join("frames.csv");
    let mut contents = String::from("# cocacola,perrier,other,water\n");
    for _ in 0..count {
        contents.push_str(frame);
        contents.push('\n');
    }
    std::fs::write(&frames, contents).unwrap();

    (
        labels.to_string_lossy().into_owned(),
        frames.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_text_output_detects_coke() {
    let dir = TempDir::new().unwrap();
    let (labels, frames) = write_fixture(dir.path(), "0.9,0.02,0.03,0.05", 20);

    chillbot(dir.path())
        .arg("--labels")
        .arg(&labels)
        .arg(&frames)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "frame 20: coke (coke-present) [cocacola: 0.90",
        ))
        .stdout(predicate::str::contains("seen: cocacola, water or other"));
}

#[test]
fn test_top_k_larger_than_vocabulary() {
    let dir = TempDir::new().unwrap();
    let (labels, frames) = write_fixture(dir.path(), "0.9,0.02,0.03,0.05", 20);

    chillbot(dir.path())
        .args(["--labels", &labels, "-k", "1000000000000000", &frames])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "frame 20: coke (coke-present) [cocacola: 0.90, water: 0.05, other: 0.03, perrier: 0.02]",
        ));
}

#[test]
fn test_json_output_one_object_per_frame() {
    let dir = TempDir::new().unwrap();
    let (labels, frames) = write_fixture(dir.path(), "0.6 0.3 0.05 0.05", 15);

    let output = chillbot(dir.path())
        .args(["--labels", &labels, "--format", "json", &frames])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 15);

    let last: serde_json::Value = serde_json::from_str(lines[14]).unwrap();
    assert_eq!(last["frame"], 15);
    assert_eq!(last["rule"], "perrier_co_occurrence");
    assert_eq!(last["result"]["perrier"], true);
}

#[test]
fn test_store_then_query() {
    let dir = TempDir::new().unwrap();
    let (labels, frames) = write_fixture(dir.path(), "0.9,0.02,0.03,0.05", 20);
    let store = dir.path().join("fridge.json");
    let store = store.to_string_lossy();

    chillbot(dir.path())
        .args(["--labels", &labels, "--store", &store, &frames])
        .assert()
        .success();

    chillbot(dir.path())
        .args(["query", "Coca Cola", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("We have some Coca-Cola."));

    chillbot(dir.path())
        .args(["query", "Diet Coke", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("We don't have any Diet Coke."));
}

#[test]
fn test_query_unknown_drink() {
    let dir = TempDir::new().unwrap();
    chillbot(dir.path())
        .args(["query", "Sprite", "--store", "unused.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown drink: Sprite"));
}

#[test]
fn test_query_without_stored_result() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("empty.json");
    chillbot(dir.path())
        .args(["query", "perrier", "--store", &store.to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stored result under key 'drinks'"));
}

#[test]
fn test_missing_labels_is_an_error() {
    let dir = TempDir::new().unwrap();
    let (_, frames) = write_fixture(dir.path(), "0.9,0.02,0.03,0.05", 1);

    chillbot(dir.path())
        .arg(&frames)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no labels file specified"));
}

#[test]
fn test_wrong_length_frame_is_skipped() {
    let dir = TempDir::new().unwrap();
    let (labels, frames) = write_fixture(dir.path(), "0.9,0.02,0.03", 3);

    chillbot(dir.path())
        .args(["--labels", &labels, &frames])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Skipping frame 1"));

    chillbot(dir.path())
        .args(["--labels", &labels, "--fail-fast", &frames])
        .assert()
        .failure()
        .stderr(predicate::str::contains("score vector has 3 entries"));
}

#[test]
fn test_config_file_settings_apply() {
    let dir = TempDir::new().unwrap();
    let (_, frames) = write_fixture(dir.path(), "0.9,0.02,0.03,0.05", 20);
    std::fs::write(
        dir.path().join("config.toml"),
        "labels = \"labels.txt\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    chillbot(dir.path())
        .arg(&frames)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rule\":\"coke_present\""));
}

#[test]
fn test_config_path_and_init() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");

    chillbot(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));

    chillbot(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(expected.exists());
}
