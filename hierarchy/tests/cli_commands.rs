//! CLI tests for the `hierarchy` binary.
//!
//! Spawns the binary against temp record files and verifies output documents
//! and exit codes.

use std::fs;
use std::process::{Command, Output};

use hierarchy::exit_codes;
use hierarchy::test_support::{record, records_file, sample_records};
use serde_json::{Value, json};

fn run_hierarchy(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hierarchy"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run hierarchy")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn tree_command_nests_records() {
    let (temp, path) = records_file(&sample_records());
    let output = run_hierarchy(temp.path(), &["tree", "--input", path.to_str().expect("path")]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let tree = stdout_json(&output);
    assert_eq!(tree[0]["id"], json!(1));
    assert_eq!(tree[0]["children"][0]["children"][0]["id"], json!(4));
    assert!(tree[0]["children"][1].get("children").is_none());
}

#[test]
fn flat_command_reads_tree_and_writes_output_file() {
    let tree = vec![
        serde_json::from_value(json!({"id": 1, "nodes": [{"id": 2}, {"id": 3}]}))
            .expect("record"),
    ];
    let (temp, path) = records_file(&tree);
    let out = temp.path().join("flat.json");
    let output = run_hierarchy(
        temp.path(),
        &[
            "flat",
            "--children-field",
            "nodes",
            "--start-level",
            "1",
            "--input",
            path.to_str().expect("path"),
            "--output",
            out.to_str().expect("path"),
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let flat: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    assert_eq!(
        flat,
        json!([
            {"id": 1, "level": 1},
            {"id": 2, "level": 2},
            {"id": 3, "level": 2},
        ])
    );
}

#[test]
fn path_command_prints_ids() {
    let (temp, path) = records_file(&sample_records());
    let output = run_hierarchy(temp.path(), &["path", "4", "-i", path.to_str().expect("path")]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout_json(&output), json!([1, 2, 4]));
}

#[test]
fn unknown_id_exits_with_empty_code() {
    let (temp, path) = records_file(&sample_records());
    let output = run_hierarchy(
        temp.path(),
        &["ancestors", "999", "-i", path.to_str().expect("path")],
    );
    assert_eq!(output.status.code(), Some(exit_codes::EMPTY));
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn cycle_exits_with_cycle_code() {
    let records = vec![record(1, 2, "a"), record(2, 1, "b")];
    let (temp, path) = records_file(&records);
    let output = run_hierarchy(
        temp.path(),
        &["descendants", "1", "-i", path.to_str().expect("path")],
    );
    assert_eq!(output.status.code(), Some(exit_codes::CYCLE));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cycle detected"));
}

#[test]
fn config_file_in_working_directory_is_applied() {
    let records: Vec<_> = vec![
        serde_json::from_value(json!({"key": "a", "up": "none"})).expect("record"),
        serde_json::from_value(json!({"key": "b", "up": "a"})).expect("record"),
    ];
    let (temp, path) = records_file(&records);
    fs::write(
        temp.path().join("hierarchy.toml"),
        "root = \"none\"\n\n[fields]\nid = \"key\"\nparent = \"up\"\n",
    )
    .expect("write config");

    let output = run_hierarchy(
        temp.path(),
        &["path-nodes", "b", "-i", path.to_str().expect("path")],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout_json(&output),
        json!([{"key": "a", "up": "none"}, {"key": "b", "up": "a"}])
    );
}

#[test]
fn init_config_refuses_to_overwrite_without_force() {
    let temp = tempfile::tempdir().expect("tempdir");
    let first = run_hierarchy(temp.path(), &["init-config"]);
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    assert!(temp.path().join("hierarchy.toml").exists());

    let second = run_hierarchy(temp.path(), &["init-config"]);
    assert_eq!(second.status.code(), Some(exit_codes::INVALID));

    let forced = run_hierarchy(temp.path(), &["init-config", "--force"]);
    assert_eq!(forced.status.code(), Some(exit_codes::OK));
}

#[test]
fn invalid_document_exits_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("bad.json");
    fs::write(&path, "{\"id\": 1}").expect("write");
    let output = run_hierarchy(temp.path(), &["tree", "-i", path.to_str().expect("path")]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema validation failed"));
}
