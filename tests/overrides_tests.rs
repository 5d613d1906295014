use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn set_override_creates_the_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("overrides.yaml");

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "set-override",
        "-f",
        file.path().to_str().unwrap(),
        "-u",
        "ada",
        "--capacity",
        "6",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Override for ada: capacity 6, multiplier default",
        ));

    let yaml = fs::read_to_string(file.path()).unwrap();
    assert!(yaml.contains("ada:"));
    assert!(yaml.contains("capacity: 6"));
}

#[test]
fn set_override_to_the_default_removes_the_user() {
    let file = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();
    file.write_str("ada:\n  capacity: 6\nbob:\n  multiplier: 2\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "set-override",
        "-f",
        file.path().to_str().unwrap(),
        "-u",
        "ada",
        "--capacity",
        "8",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ada uses the global defaults"));

    let yaml = fs::read_to_string(file.path()).unwrap();
    assert!(!yaml.contains("ada"));
    assert!(yaml.contains("multiplier: 2"));
}

#[test]
fn set_override_compares_against_the_settings_file() {
    let file = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();
    let settings = assert_fs::NamedTempFile::new("settings.yaml").unwrap();
    settings.write_str("daily_threshold: 6\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "set-override",
        "-f",
        file.path().to_str().unwrap(),
        "-u",
        "ada",
        "--capacity",
        "6",
        "--settings",
        settings.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ada uses the global defaults"));
}

#[test]
fn set_override_rejects_values_below_one() {
    let file = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "set-override",
        "-f",
        file.path().to_str().unwrap(),
        "-u",
        "ada",
        "--multiplier",
        "0.5",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to set override"));

    file.assert(predicate::path::missing());
}

#[test]
fn set_override_needs_a_value() {
    let file = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["set-override", "-f", file.path().to_str().unwrap(), "-u", "ada"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--capacity and/or --multiplier"));
}

#[test]
fn reset_overrides_clears_every_user() {
    let file = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();
    file.write_str("ada:\n  capacity: 6\nbob: 2\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["reset-overrides", "-f", file.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 user overrides"));

    let yaml = fs::read_to_string(file.path()).unwrap();
    assert!(!yaml.contains("ada"));
    assert!(!yaml.contains("bob"));
}
