#[path = "../../frontier_core/tests/support/mod.rs"]
mod support;

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use frontier_core::category::Category;
use frontier_core::core_api::Engine;
use frontier_core::types::{MineralType, Point};
use serde_json::Value;

struct TempFiles(Vec<PathBuf>);

impl Drop for TempFiles {
    fn drop(&mut self) {
        for path in &self.0 {
            let _ = fs::remove_file(path);
        }
    }
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_frontier-se"))
        .args(args)
        .output()
        .expect("failed to run frontier-se CLI")
}

fn fixture(prefix: &str) -> (TempFiles, String) {
    let path = support::full_save().write_temp(prefix);
    let shown = path.to_string_lossy().to_string();
    (TempFiles(vec![path]), shown)
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
fn full_json_describes_the_save() {
    let (_files, path) = fixture("frontier_cli_full");
    let output = run_cli(&["--json", &path]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["metadata"]["name"], "Stonebrook");
    assert_eq!(json["metadata"]["villagers"], 42);
    assert_eq!(json["camera"], serde_json::json!([1.5, 2.5, 3.5]));
    assert_eq!(json["minerals"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["raiders"].as_array().map(Vec::len), Some(2));
}

#[test]
fn selected_fields_limit_json_output() {
    let (_files, path) = fixture("frontier_cli_selected");
    let output = run_cli(&["--houses", "--animal-spawns", "--json", &path]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let keys: Vec<&str> = json
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["animal_spawns", "houses"]);
    assert_eq!(json["animal_spawns"][0]["species"], "Deer");
}

#[test]
fn text_output_is_a_settlement_sheet() {
    let (_files, path) = fixture("frontier_cli_text");
    let output = run_cli(&[&path]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FARTHEST FRONTIER"));
    assert!(stdout.contains("STONEBROOK"));
    assert!(stdout.contains(" ::: Minerals :::"));
}

#[test]
fn layout_json_lists_every_record() {
    let (_files, path) = fixture("frontier_cli_layout");
    let output = run_cli(&["--layout", "--json", &path]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let records = json["records"].as_array().expect("records array");
    assert_eq!(records.len(), support::full_save().categories().len());
    assert_eq!(records[0]["category"], "MetaData");
    assert_eq!(records[0]["range"]["start"], 0);
    assert_eq!(json["file_len"], records.last().unwrap()["range"]["end"]);
}

#[test]
fn record_flag_decodes_one_record() {
    let (_files, path) = fixture("frontier_cli_record");
    let output = run_cli(&["--record", "raider", &path]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["Raider"]["raider_type"], "Thief");
    assert_eq!(json["Raider"]["hp"], 80.0);

    let missing = run_cli(&["--record", "Raider:5", &path]);
    assert_eq!(missing.status.code(), Some(1));
}

#[test]
fn edits_require_output() {
    let (_files, path) = fixture("frontier_cli_no_output");
    let output = run_cli(&["--remove-fow", &path]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--output"));
}

#[test]
fn output_requires_an_edit() {
    let (_files, path) = fixture("frontier_cli_no_edit");
    let dst = support::temp_path("frontier_cli_no_edit_dst");
    let dst_str = dst.to_string_lossy().to_string();
    let output = run_cli(&["--output", &dst_str, &path]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dst.exists());
}

#[test]
fn edits_are_written_to_output() {
    let (mut files, path) = fixture("frontier_cli_edit");
    let dst = support::temp_path("frontier_cli_edit_dst");
    files.0.push(dst.clone());
    let dst_str = dst.to_string_lossy().to_string();
    let original = fs::read(&path).unwrap();

    let output = run_cli(&[
        "--remove-building-sites",
        "--set-name",
        "New Haven",
        "--pacifist",
        "on",
        "--add-mineral",
        "sand:1,2,3:4.5:600",
        "--add-mineral",
        "coal:7,8,9:2:50",
        "--output",
        &dst_str,
        &path,
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote edited save to"));

    assert_eq!(fs::read(&path).unwrap(), original);

    let session = Engine::new().open(&dst).expect("edited save should open");
    assert_eq!(session.record_count(Category::BuildingBuildSite), 0);

    let mut reader = session.reader().unwrap();
    let meta = reader.general_save_data().unwrap();
    assert_eq!(meta.name, "New Haven");
    assert_eq!(meta.pacifist, 1);

    let minerals = reader.minerals().unwrap();
    let sand: Vec<_> = minerals
        .iter()
        .filter(|m| m.mineral_type == MineralType::Sand)
        .collect();
    assert_eq!(sand.len(), 3);
    assert_eq!(sand[2].position, Point::new(1.0, 2.0, 3.0));
    assert_eq!(sand[2].amount, 600);
    assert_eq!(
        minerals.last().map(|m| (m.mineral_type, m.amount)),
        Some((MineralType::Coal, 50))
    );
}

#[test]
fn copy_report_json() {
    let (mut files, path) = fixture("frontier_cli_report");
    let dst = support::temp_path("frontier_cli_report_dst");
    files.0.push(dst.clone());
    let dst_str = dst.to_string_lossy().to_string();

    let output = run_cli(&["--remove-fow", "--json", "--output", &dst_str, &path]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["records_patched"], 1);
    assert_eq!(json["records_dropped"], 0);
    assert_eq!(json["records_read"], json["records_written"]);
}

#[test]
fn writing_over_the_source_fails() {
    let (_files, path) = fixture("frontier_cli_conflict");
    let before = fs::read(&path).unwrap();

    let output = run_cli(&["--double-minerals", "--output", &path, &path]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SourceDestConflict"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn malformed_mineral_is_a_usage_error() {
    let (_files, path) = fixture("frontier_cli_bad_mineral");
    let dst = support::temp_path("frontier_cli_bad_mineral_dst");
    let dst_str = dst.to_string_lossy().to_string();
    let output = run_cli(&["--add-mineral", "ruby:1,2,3:1:1", "--output", &dst_str, &path]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dst.exists());
}
