//! Record document load/save helpers with schema validation.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Serialize;
use serde_json::Value;

use crate::core::record::JsonRecord;

/// Bundled JSON Schema for record documents.
pub const RECORDS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/records/v1.schema.json"
));

/// Path value meaning stdin/stdout.
pub const STDIO: &str = "-";

/// Load and validate a record document (flat collection or tree).
///
/// `-` reads from stdin.
pub fn load_records(path: &Path) -> Result<Vec<JsonRecord>> {
    let contents = if path.as_os_str() == STDIO {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read records from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?
    };
    parse_records(&contents).with_context(|| format!("load records {}", path.display()))
}

/// Parse a record document from text, checking it against [`RECORDS_SCHEMA`].
pub fn parse_records(contents: &str) -> Result<Vec<JsonRecord>> {
    let value: Value = serde_json::from_str(contents).context("parse records json")?;
    validate_schema(&value)?;
    serde_json::from_value(value).context("deserialize records")
}

/// Serialize `value` to pretty-printed JSON with trailing newline.
///
/// `None` or `-` writes to stdout.
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    match path.filter(|path| path.as_os_str() != STDIO) {
        Some(path) => {
            fs::write(path, payload).with_context(|| format!("write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(payload.as_bytes())
                .context("write json to stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn validate_schema(document: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(RECORDS_SCHEMA).context("parse records schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(document) {
        let messages = compiled
            .iter_errors(document)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "records schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
