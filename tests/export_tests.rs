use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const ENTRIES_JSON: &str = r##"[
  {
    "id": "a1",
    "userId": "ada",
    "userName": "Ada",
    "timeInterval": { "start": "2026-02-16T08:00:00Z", "end": "2026-02-16T18:00:00Z" },
    "hourlyRate": { "amount": 2000, "currency": "USD" },
    "project": { "name": "Apollo", "clientName": "NASA" },
    "tags": [{ "name": "launch" }]
  },
  {
    "id": "b1",
    "userId": "bob",
    "userName": "Bob",
    "timeInterval": { "start": "2026-02-23T09:30:00Z", "duration": "PT4H" },
    "hourlyRate": { "amount": 1000, "currency": "USD" }
  }
]"##;

fn entries_file() -> assert_fs::NamedTempFile {
    let file = assert_fs::NamedTempFile::new("entries.json").unwrap();
    file.write_str(ENTRIES_JSON).unwrap();
    file
}

#[test]
fn export_writes_user_summary_csv() {
    let input = entries_file();
    let output = assert_fs::NamedTempFile::new("report.csv").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "export",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CSV report written to"));

    let csv = fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("User Name,Capacity (hrs)"));
    assert_eq!(lines[1], "Ada,8,8.00,2.00,10.00,125,200.00,20.00,220.00");
    assert_eq!(lines[2], "Bob,8,4.00,0.00,4.00,50,40.00,0.00,40.00");
}

#[test]
fn export_detailed_writes_one_row_per_entry() {
    let input = entries_file();
    let output = assert_fs::NamedTempFile::new("detailed.csv").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "export",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "--detailed",
    ]);
    cmd.assert().success();

    output.assert(predicate::str::contains(
        "Ada,2026-02-16,08:00,18:00,Apollo,NASA,,launch,,10,8,2,20,30,200,20,220",
    ));
    output.assert(predicate::str::contains(
        "Bob,2026-02-23,09:30,13:30,No Project,,,,,4,4,0,10,15,40,0,40",
    ));
}

#[test]
fn export_by_week_includes_date_ranges() {
    let input = entries_file();
    let output = assert_fs::NamedTempFile::new("weeks.csv").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.args([
        "export",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "-g",
        "week",
    ]);
    cmd.assert().success();

    output.assert(predicate::str::contains("2026-W09,Feb 23 - Mar 1,4.00,0.00,4.00,40.00"));
    output.assert(predicate::str::contains("2026-W08,Feb 16 - Feb 22,8.00,2.00,10.00,220.00"));
}

#[test]
fn export_names_the_file_after_the_report_period() {
    let input = entries_file();
    let dir = assert_fs::TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("overtime");
    cmd.current_dir(dir.path());
    cmd.args(["export", "-i", input.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Overtime_Report_2026-02-16_to_2026-02-23.csv",
        ));

    dir.child("Overtime_Report_2026-02-16_to_2026-02-23.csv")
        .assert(predicate::path::exists());
}
