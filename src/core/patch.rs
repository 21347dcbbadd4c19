//! JSON-Patch request model for partial updates
//!
//! PATCH bodies are ordered sequences of [`PatchEntry`] serialized as a JSON
//! array; the order is significant because entries apply in sequence (a
//! `Test` entry preceding a `Replace` acts as a precondition).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One operation kind of a JSON-Patch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    /// Add a value at the target path.
    Add,
    /// Remove the value at the target path.
    Remove,
    /// Replace the value at the target path.
    Replace,
    /// Assert that the target path holds the given value.
    Test,
    /// Move the value to the target path.
    Move,
    /// Copy the value to the target path.
    Copy,
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOperation::Add => write!(f, "add"),
            PatchOperation::Remove => write!(f, "remove"),
            PatchOperation::Replace => write!(f, "replace"),
            PatchOperation::Test => write!(f, "test"),
            PatchOperation::Move => write!(f, "move"),
            PatchOperation::Copy => write!(f, "copy"),
        }
    }
}

/// Value carried by a patch entry.
///
/// The target field decides which form applies, so the union is explicit
/// rather than an untyped payload; serialization is exhaustive over the four
/// forms and emits the bare JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
    /// Boolean field value.
    Boolean(bool),
    /// Integer field value.
    Integer(i64),
    /// String field value.
    String(String),
    /// Nested object value.
    Object(serde_json::Map<String, serde_json::Value>),
}

impl From<bool> for PatchValue {
    fn from(value: bool) -> Self {
        PatchValue::Boolean(value)
    }
}

impl From<i64> for PatchValue {
    fn from(value: i64) -> Self {
        PatchValue::Integer(value)
    }
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        PatchValue::String(value.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        PatchValue::String(value)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for PatchValue {
    fn from(value: serde_json::Map<String, serde_json::Value>) -> Self {
        PatchValue::Object(value)
    }
}

/// One operation in a JSON-Patch request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchEntry {
    /// Operation kind.
    pub op: PatchOperation,
    /// Slash-delimited pointer path, e.g. `/cname`.
    pub path: String,
    /// Payload for operations that carry one; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PatchValue>,
}

impl PatchEntry {
    /// Create an entry without a value.
    pub fn new(op: PatchOperation, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            value: None,
        }
    }

    /// Attach a value to the entry.
    pub fn with_value(mut self, value: impl Into<PatchValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Shorthand for a `replace` entry.
    pub fn replace(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new(PatchOperation::Replace, path).with_value(value)
    }

    /// Shorthand for an `add` entry.
    pub fn add(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new(PatchOperation::Add, path).with_value(value)
    }

    /// Shorthand for a `test` precondition entry.
    pub fn test(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new(PatchOperation::Test, path).with_value(value)
    }

    /// Shorthand for a `remove` entry.
    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(PatchOperation::Remove, path)
    }
}

/// Structured builder for pointer paths like `/languageMapping/en/2`.
///
/// Segments are joined with `/` and escaped per RFC 6901 (`~` becomes `~0`,
/// `/` becomes `~1`), so segment values containing either character cannot
/// corrupt the rendered pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerPath {
    segments: Vec<String>,
}

impl PointerPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment.
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    fn escape(segment: &str) -> String {
        segment.replace('~', "~0").replace('/', "~1")
    }
}

impl fmt::Display for PointerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", Self::escape(segment))?;
        }
        Ok(())
    }
}

impl From<PointerPath> for String {
    fn from(path: PointerPath) -> Self {
        path.to_string()
    }
}
