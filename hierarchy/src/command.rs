//! Command orchestration for the `hierarchy` binary.
//!
//! Couples the pure engine with record documents and maps results onto the
//! stable exit codes.

use serde_json::Value;

use crate::core::engine::Hierarchy;
use crate::core::error::{HierarchyError, HierarchyResult};
use crate::core::record::JsonRecord;
use crate::exit_codes;

/// A single engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Tree,
    Flat { start_level: usize },
    Ancestors { id: Value },
    Descendants { id: Value },
    PathIds { id: Value, include_self: bool },
    PathNodes { id: Value, include_self: bool },
}

impl Operation {
    /// Query operations report an empty result through the exit code.
    fn is_query(&self) -> bool {
        !matches!(self, Operation::Tree | Operation::Flat { .. })
    }
}

/// Result document plus the exit code it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub document: Value,
    pub exit_code: i32,
}

/// Run `operation` over `records`.
pub fn execute(
    engine: &Hierarchy<JsonRecord>,
    records: &[JsonRecord],
    operation: &Operation,
) -> HierarchyResult<Outcome> {
    let document = match operation {
        Operation::Tree => records_document(engine.to_tree(records)?),
        Operation::Flat { start_level } => records_document(engine.to_flat(records, *start_level)),
        Operation::Ancestors { id } => records_document(engine.ancestors(records, id)?),
        Operation::Descendants { id } => records_document(engine.descendants(records, id)?),
        Operation::PathIds { id, include_self } => {
            Value::Array(engine.path_ids(records, id, *include_self)?)
        }
        Operation::PathNodes { id, include_self } => {
            records_document(engine.path_nodes(records, id, *include_self)?)
        }
    };
    let empty = document.as_array().is_some_and(Vec::is_empty);
    let exit_code = if operation.is_query() && empty {
        exit_codes::EMPTY
    } else {
        exit_codes::OK
    };
    Ok(Outcome {
        document,
        exit_code,
    })
}

/// Exit code for an engine error.
pub fn error_exit_code(err: &HierarchyError) -> i32 {
    match err {
        HierarchyError::CycleDetected { .. } => exit_codes::CYCLE,
    }
}

/// Interpret a command-line identifier: JSON when it parses, a string otherwise.
pub fn parse_identifier(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn records_document(records: Vec<JsonRecord>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}
