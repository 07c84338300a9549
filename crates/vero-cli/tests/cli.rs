use assert_cmd::Command;
use predicates::prelude::*;

/// A `vero` invocation isolated from the host user's config.
fn vero(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("vero").expect("binary builds");
    cmd.env("VERO_CONFIG_DIR", config_dir);
    cmd.env_remove("VERO_FORMAT");
    cmd.env_remove("VERO_LOG");
    cmd
}

#[test]
fn views_lists_every_registered_view() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["views"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("athletes")
                .and(predicate::str::contains("finance"))
                .and(predicate::str::contains("compliance"))
                .and(predicate::str::contains("stakeholders"))
                .and(predicate::str::contains("sentiment")),
        );
}

#[test]
fn list_renders_seeded_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["list", "athletes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Luka Vidmar").and(predicate::str::contains("Stage")));
}

#[test]
fn list_json_is_parseable_and_complete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = vero(dir.path())
        .args(["list", "athletes", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let records: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(records.as_array().map(Vec::len), Some(8));
}

#[test]
fn unknown_view_fails_and_lists_registered_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["list", "payroll"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registered views").and(predicate::str::contains("athletes")));
}

#[test]
fn add_with_missing_required_fields_exits_2_without_creating() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["add", "athletes", "--set", "stage=foundation"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name").and(predicate::str::contains("must not be empty")));
}

#[test]
fn add_with_valid_fields_reports_the_new_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args([
            "add",
            "athletes",
            "--set",
            "name=Vid Potokar",
            "--set",
            "age_group=u16",
            "--set",
            "stage=development",
            "--set",
            "progress=55",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created record").and(predicate::str::contains("Vid Potokar")));
}

#[test]
fn add_with_unknown_field_exits_2_and_lists_known_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["add", "athletes", "--set", "nickname=Vid"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown field").and(predicate::str::contains("age_group")));
}

#[test]
fn edit_with_unknown_id_is_a_reported_noop() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = vero(dir.path())
        .args([
            "edit", "athletes", "zzzz", "--set", "progress=70", "--format", "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(result["status"], "missing");
}

#[test]
fn edit_merges_the_patch_into_the_existing_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["edit", "athletes", "2", "--set", "progress=70"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Updated record 2")
                .and(predicate::str::contains("Ana Kovač"))
                .and(predicate::str::contains("70")),
        );
}

#[test]
fn delete_reports_remaining_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["delete", "athletes", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Deleted record 1").and(predicate::str::contains("7 records remain")),
        );
}

#[test]
fn delete_of_unknown_id_changes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["delete", "athletes", "zzzz"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("nothing changed").and(predicate::str::contains("8 records remain")),
        );
}

#[test]
fn export_csv_starts_with_the_header_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["export", "athletes"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Name,Age,Stage,Progress,Id\n"));
}

#[test]
fn export_doc_carries_title_and_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["export", "compliance", "--format", "doc"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Compliance log\n").and(predicate::str::contains("6 records")),
        );
}

#[test]
fn export_to_a_file_writes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.csv");
    vero(dir.path())
        .args(["export", "finance", "--output"])
        .arg(&path)
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).expect("file written");
    assert!(content.starts_with("Item,Category,Amount,Var %,Id\n"));
    assert_eq!(content.lines().count(), 8);
}

#[test]
fn summary_json_has_stable_shape() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = vero(dir.path())
        .args(["summary", "athletes", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(summary["total"], 8);
    let groups = summary["groups"].as_array().expect("groups array");
    assert!(!groups.is_empty());
    let share_total: f64 = groups
        .iter()
        .map(|g| g["share_pct"].as_f64().unwrap_or(f64::NAN))
        .sum();
    assert!((share_total - 100.0).abs() < 1e-6);
}

#[test]
fn config_set_round_trips_through_show() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["config", "set", "board.default_view", "finance"])
        .assert()
        .success();
    vero(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_view = \"finance\""));
}

#[test]
fn config_rejects_unknown_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["config", "set", "board.theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn threshold_config_flows_into_summaries() {
    let dir = tempfile::tempdir().expect("tempdir");
    vero(dir.path())
        .args(["config", "set", "thresholds.progress_floor", "80"])
        .assert()
        .success();
    let out = vero(dir.path())
        .args(["summary", "athletes", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    let flagged = summary["flagged"].as_array().expect("flagged array");
    assert_eq!(flagged.len(), 7);
}
