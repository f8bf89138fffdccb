use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("{} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} has unsupported top-level shape ({found}); expected an object, an array or a sheet object", path.display())]
    Format { path: PathBuf, found: &'static str },
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} does not contain converted news records: {source}", path.display())]
    Converted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Failures scoped to a single source record. The batch keeps going.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("body text is empty")]
    EmptyBody,
    #[error("record is a JSON {0}, not an object")]
    NotAnObject(&'static str),
}

impl RecordError {
    /// Skips are expected data gaps; everything else counts as a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, RecordError::EmptyBody)
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
