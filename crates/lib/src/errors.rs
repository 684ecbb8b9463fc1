//! Structured error types for document addressing.
//!
//! Every traversal and coercion failure is one of a small set of variants
//! carrying the path at which it occurred, so callers can distinguish a
//! missing key from a kind disagreement without string matching.

use serde_json::Value;
use thiserror::Error;

use crate::path::Path;

/// Errors produced by path parsing, traversal, mutation, and coercion.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocError {
    /// The path string violates the grammar.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path string, verbatim.
        path: String,
        /// What the parser objected to.
        reason: String,
    },

    /// A field segment addressed a key that does not exist.
    #[error("key {key:?} does not exist at {path}")]
    KeyNotFound {
        /// Path of the object that was missing the key.
        path: Path,
        /// The key that was looked up.
        key: String,
    },

    /// An index segment addressed past the end of an array.
    #[error("index {index} out of bounds (len {len}) at {path}")]
    IndexOutOfBounds {
        /// Path of the array.
        path: Path,
        /// The index that was accessed.
        index: usize,
        /// The array's length at access time.
        len: usize,
    },

    /// A segment or coercion was applied to a value of the wrong kind.
    #[error("type mismatch at {path}: expected {expected}, found {found} ({value})")]
    TypeMismatch {
        /// Path of the offending value.
        path: Path,
        /// The kind the operation required.
        expected: &'static str,
        /// The kind actually found.
        found: &'static str,
        /// Short rendering of the offending value.
        value: String,
    },
}

impl DocError {
    /// Create an invalid-path error.
    #[inline]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DocError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a key-not-found error.
    #[inline]
    pub fn key_not_found(path: Path, key: impl Into<String>) -> Self {
        DocError::KeyNotFound {
            path,
            key: key.into(),
        }
    }

    /// Create an index-out-of-bounds error.
    #[inline]
    pub fn index_out_of_bounds(path: Path, index: usize, len: usize) -> Self {
        DocError::IndexOutOfBounds { path, index, len }
    }

    /// Create a type-mismatch error naming the offending value and its kind.
    #[inline]
    pub fn type_mismatch(path: Path, expected: &'static str, value: &Value) -> Self {
        DocError::TypeMismatch {
            path,
            expected,
            found: value_type_name(value),
            value: value_preview(value),
        }
    }

    /// Check if this error is a path-syntax failure.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, DocError::InvalidPath { .. })
    }

    /// Check if this error is a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocError::KeyNotFound { .. })
    }

    /// Check if this error is an out-of-bounds index.
    pub fn is_index_out_of_bounds(&self) -> bool {
        matches!(self, DocError::IndexOutOfBounds { .. })
    }

    /// Check if this error is a kind disagreement.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, DocError::TypeMismatch { .. })
    }

    /// Stamp path context onto an error raised below the document layer.
    ///
    /// Coercions operate on a bare value and report an empty path; the
    /// document accessor that resolved the value prefixes the full path here.
    pub fn with_path(self, prefix: &Path) -> Self {
        match self {
            DocError::KeyNotFound { path, key } => DocError::KeyNotFound {
                path: prefix.join(&path),
                key,
            },
            DocError::IndexOutOfBounds { path, index, len } => DocError::IndexOutOfBounds {
                path: prefix.join(&path),
                index,
                len,
            },
            DocError::TypeMismatch {
                path,
                expected,
                found,
                value,
            } => DocError::TypeMismatch {
                path: prefix.join(&path),
                expected,
                found,
                value,
            },
            other => other,
        }
    }
}

/// Get the kind name of a JSON value.
#[inline]
pub fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a short preview of a value for error messages.
///
/// Containers can be arbitrarily large; the preview is capped so errors stay
/// a single readable line.
pub fn value_preview(v: &Value) -> String {
    const MAX: usize = 40;
    let rendered = v.to_string();
    if rendered.len() <= MAX {
        rendered
    } else {
        let cut = rendered
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &rendered[..cut])
    }
}
