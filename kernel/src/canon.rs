//! Canonical JSON bytes for digesting search artifacts.
//!
//! Every digest in the workspace is computed over bytes produced here, so two
//! runs that build the same logical JSON value always hash identically.
//!
//! # Rules
//!
//! 1. Object keys are emitted in lexicographic byte order, at every depth.
//! 2. Compact separators (`,` and `:`), no whitespace.
//! 3. Numbers must be integers; floats are rejected.
//! 4. Strings use `serde_json`'s escaping (stable across platforms).

use std::io::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Render `value` as canonical JSON bytes.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if the value contains a float.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::with_capacity(128);
    emit(&mut out, value)?;
    Ok(out)
}

fn emit(out: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => emit_scalar(out, value),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
            // `Number`'s Display for i64/u64 is plain decimal.
            let _ = write!(out, "{n}");
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit_scalar(out, &Value::String(key.clone()));
                out.push(b':');
                emit(out, item)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn emit_scalar(out: &mut Vec<u8>, value: &serde_json::Value) {
    // Scalars never fail to serialize into a Vec.
    let _ = serde_json::to_writer(&mut *out, value);
}
