//! Test-only helpers for constructing records and record files.

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::core::record::JsonRecord;

/// Create a record with `id`, `parent_id` and `name` fields.
pub fn record(id: i64, parent_id: i64, name: &str) -> JsonRecord {
    let mut fields = JsonRecord::new();
    fields.insert("id".to_string(), json!(id));
    fields.insert("parent_id".to_string(), json!(parent_id));
    fields.insert("name".to_string(), json!(name));
    fields
}

/// The four-record hierarchy used throughout the docs:
/// `root(1) -> a(2) -> c(4)` and `root(1) -> b(3)`.
pub fn sample_records() -> Vec<JsonRecord> {
    vec![
        record(1, 0, "root"),
        record(2, 1, "a"),
        record(3, 1, "b"),
        record(4, 2, "c"),
    ]
}

/// Convert a JSON array of objects into records. Panics on other shapes.
pub fn records_from(value: Value) -> Vec<JsonRecord> {
    serde_json::from_value(value).expect("array of objects")
}

/// Values of the `id` field, in order.
pub fn ids(records: &[JsonRecord]) -> Vec<Value> {
    records
        .iter()
        .map(|record| record.get("id").cloned().unwrap_or(Value::Null))
        .collect()
}

/// Write `records` as JSON into a fresh temp dir, returning the dir guard and file path.
pub fn records_file(records: &[JsonRecord]) -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("records.json");
    let payload = serde_json::to_string_pretty(records).expect("serialize records");
    fs::write(&path, payload).expect("write records");
    (temp, path)
}
