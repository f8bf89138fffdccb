//! Reading source exports from disk

use crate::error::{json_kind, ConvertError};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load the records of a source export.
///
/// Accepted shapes:
/// - an array of records
/// - a single record object (wrapped into a one-element list)
/// - an object holding the records under one of `sheet_keys`
pub fn load_records<P: AsRef<Path>>(path: P, sheet_keys: &[String]) -> Result<Vec<Value>, ConvertError> {
    let path = path.as_ref();
    let value = read_json(path)?;
    records_from_value(value, sheet_keys).map_err(|found| ConvertError::Format {
        path: path.to_path_buf(),
        found,
    })
}

/// Read and parse a whole JSON document.
pub fn read_json(path: &Path) -> Result<Value, ConvertError> {
    let mut content = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConvertError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if content.starts_with(UTF8_BOM) {
        content.drain(..UTF8_BOM.len());
    }

    parse_document(content).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse with simd-json, falling back to serde_json for its error position.
fn parse_document(content: Vec<u8>) -> Result<Value, serde_json::Error> {
    // simd-json parses in place, keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!("simd-json rejected input ({err}), retrying with serde_json");
            serde_json::from_slice(&content)
        }
    }
}

/// Unwrap a parsed document into its record list. Errors carry the
/// offending top-level kind.
pub fn records_from_value(value: Value, sheet_keys: &[String]) -> Result<Vec<Value>, &'static str> {
    match value {
        Value::Array(items) => {
            debug!(records = items.len(), "loaded record array");
            Ok(items)
        }
        Value::Object(mut obj) => {
            for key in sheet_keys {
                match obj.remove(key) {
                    Some(Value::Array(items)) => {
                        debug!(sheet = %key, records = items.len(), "loaded sheet");
                        return Ok(items);
                    }
                    Some(other) => return Err(sheet_kind(&other)),
                    None => {}
                }
            }
            debug!("loaded single record object");
            Ok(vec![Value::Object(obj)])
        }
        other => Err(json_kind(&other)),
    }
}

fn sheet_kind(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "sheet holding an object",
        Value::String(_) => "sheet holding a string",
        _ => "sheet holding a scalar",
    }
}
