//! Test case loading.
//!
//! A test case document is a JSON object:
//!
//! ```json
//! {
//!   "rawBinary": false,
//!   "sharedStrings": false,
//!   "sharedProperties": false,
//!   "writeEndMarker": true,
//!   "value": "aGVsbG8="
//! }
//! ```
//!
//! Flags are optional and default to `false`. `value` is required and is
//! decoded according to the category's expected type, so `5` is an `i32`
//! under `integer` and an `f32` under `float`. Binary values are base64
//! strings using the standard alphabet.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use smile_fs::{Filesystem, FsError};
use thiserror::Error;

use crate::category::ValueKind;
use crate::types::TestCase;
use crate::value::FixtureValue;

/// Errors that can occur when loading a test case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("test case not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read test case {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("malformed test case {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// On-disk shape of a test case, before the value is typed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CaseDocument {
    #[serde(default)]
    raw_binary: bool,
    #[serde(default)]
    shared_strings: bool,
    #[serde(default)]
    shared_properties: bool,
    #[serde(default)]
    write_end_marker: bool,
    /// `None` when absent; an explicit `null` is kept as `Value::Null`.
    #[serde(default, deserialize_with = "present")]
    value: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Load a test case from `path`, decoding its value as `expected`.
pub fn load_test_case<F>(fs: &F, path: &Path, expected: ValueKind) -> Result<TestCase, LoadError>
where
    F: Filesystem + ?Sized,
{
    let bytes = fs.read_bytes(path).map_err(|e| match e {
        FsError::NotFound(_) => LoadError::NotFound(path.to_path_buf()),
        other => LoadError::Read {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    let malformed = |reason| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    };
    let content =
        String::from_utf8(bytes).map_err(|e| malformed(format!("not valid UTF-8: {}", e)))?;

    parse_test_case(&content, expected).map_err(malformed)
}

/// Parse test case content.
///
/// This is the core parsing logic, separated for testability. The error is
/// a human-readable reason; the caller attaches the path.
pub fn parse_test_case(content: &str, expected: ValueKind) -> Result<TestCase, String> {
    let document: CaseDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let raw = match document.value {
        None => return Err("missing required field `value`".to_string()),
        Some(Value::Null) => return Err("`value` is null".to_string()),
        Some(raw) => raw,
    };
    let value = decode_value(raw, expected)?;

    let case = TestCase::new(value, expected)
        .map_err(|e| e.to_string())?
        .with_raw_binary(document.raw_binary)
        .with_shared_strings(document.shared_strings)
        .with_shared_properties(document.shared_properties)
        .with_write_end_marker(document.write_end_marker);

    Ok(case)
}

/// Decode a JSON value as the given payload kind.
pub fn decode_value(raw: Value, kind: ValueKind) -> Result<FixtureValue, String> {
    let value = match kind {
        ValueKind::Integer => FixtureValue::Integer(typed(raw, kind)?),
        ValueKind::Long => FixtureValue::Long(typed(raw, kind)?),
        ValueKind::String => FixtureValue::String(typed(raw, kind)?),
        ValueKind::Float => FixtureValue::Float(typed(raw, kind)?),
        ValueKind::Double => FixtureValue::Double(typed(raw, kind)?),
        ValueKind::Boolean => FixtureValue::Boolean(typed(raw, kind)?),
        ValueKind::Binary => {
            let encoded: String = typed(raw, kind)?;
            let bytes = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| format!("`value` is not valid base64: {}", e))?;
            FixtureValue::Binary(bytes)
        }
    };
    Ok(value)
}

fn typed<T: DeserializeOwned>(raw: Value, kind: ValueKind) -> Result<T, String> {
    serde_json::from_value(raw).map_err(|e| format!("`value` is not a valid {}: {}", kind, e))
}
