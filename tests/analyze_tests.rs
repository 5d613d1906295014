use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const ENTRIES_JSON: &str = r##"[
  {
    "id": "a1",
    "userId": "ada",
    "userName": "Ada",
    "timeInterval": { "start": "2026-02-16T08:00:00Z", "duration": "PT10H" },
    "hourlyRate": { "amount": 2000, "currency": "USD" },
    "project": { "name": "Apollo", "color": "#3366ff", "clientName": "NASA" }
  },
  {
    "id": "b1",
    "userId": "bob",
    "userName": "Bob",
    "timeInterval": { "start": "2026-02-23T09:30:00Z", "end": "2026-02-23T13:30:00Z" },
    "hourlyRate": { "amount": 1000, "currency": "USD" }
  },
  {
    "id": "b2",
    "userId": "bob",
    "userName": "Bob",
    "timeInterval": { "start": "2026-02-23T14:00:00Z", "duration": "PT0S" }
  }
]"##;

fn entries_file() -> assert_fs::NamedTempFile {
    let file = assert_fs::NamedTempFile::new("entries.json").unwrap();
    file.write_str(ENTRIES_JSON).unwrap();
    file
}

#[test]
fn analyze_prints_the_report() {
    let input = entries_file();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["analyze", "-i", input.path().to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Users: 2"))
        .stdout(predicate::str::contains(
            "Total hours: 14h | Regular: 12h | Overtime: 2h",
        ))
        .stdout(predicate::str::contains("Total cost: $260.00 (USD)"))
        .stdout(predicate::str::contains("Ada | 8h | 1.5x | 8h | 2h | 10h | 1 | $220.00"))
        .stdout(predicate::str::contains("Excluded entries: 1"));
}

#[test]
fn analyze_applies_flags_and_overrides() {
    let input = entries_file();
    let overrides = assert_fs::NamedTempFile::new("overrides.yaml").unwrap();
    overrides.write_str("bob:\n  capacity: 3\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "analyze",
        "-i",
        input.path().to_str().unwrap(),
        "--multiplier",
        "2",
        "--overrides",
        overrides.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Overtime multiplier: 2x"))
        .stdout(predicate::str::contains("Ada | 8h | 2x | 8h | 2h | 10h | 1 | $240.00"))
        .stdout(predicate::str::contains("Bob | 3h | 2x | 3h | 1h | 4h | 1 | $50.00"));
}

#[test]
fn analyze_writes_json_output() {
    let input = entries_file();
    let output = assert_fs::NamedTempFile::new("analysis.json").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "analyze",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Analysis written to"));

    let contents = fs::read_to_string(output.path()).unwrap();
    let analysis: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(analysis["summary"]["totalHours"], 14.0);
    assert_eq!(analysis["users"][0]["userId"], "ada");
    assert_eq!(analysis["users"][0]["entries"][0]["end"], "2026-02-16T18:00:00.000Z");
    assert_eq!(analysis["excluded"][0]["entryId"], "b2");
    assert_eq!(analysis["excluded"][0]["reason"], "zero_duration");
}

#[test]
fn analyze_writes_yaml_output_for_other_extensions() {
    let input = entries_file();
    let output = assert_fs::NamedTempFile::new("analysis.yaml").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "analyze",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);
    cmd.assert().success();

    output.assert(predicate::str::contains("userCount: 2"));
}

#[test]
fn analyze_reports_a_missing_input_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let missing = dir.child("missing.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["analyze", "-i", missing.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to analyze time entries"));
}

#[test]
fn summary_groups_by_project() {
    let input = entries_file();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["summary", "-i", input.path().to_str().unwrap(), "-g", "project"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary by Project (2 projects)"))
        .stdout(predicate::str::contains("Apollo | 8h | 2h | 10h | 80% | 20% | $220.00"))
        .stdout(predicate::str::contains("No Project | 4h | 0h | 4h | 100% | 0% | $40.00"))
        .stdout(predicate::str::contains("Total | 12h | 2h | 14h"));
}

#[test]
fn summary_by_user_shows_capacity() {
    let input = entries_file();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args(["summary", "-i", input.path().to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary by User (2 users)"))
        .stdout(predicate::str::contains("Ada | 8h | 8h | 2h | 10h | 80% | 20% | $220.00"))
        .stdout(predicate::str::contains("Bob | 8h | 4h | 0h | 4h | 100% | 0% | $40.00"));
}
