//! Dotson: dotted-path addressing for dynamic JSON documents.
//!
//! This library wraps an arbitrary JSON value (an object, an array, or a bare
//! scalar) in a [`Document`] and lets callers read, write, and delete values
//! through a small dotted-path language with optional bracketed array indices:
//!
//! ```text
//! servers[0].tags[2]
//! a.b.c[0][1].d
//! [3]           (bracket-only paths address an array root)
//! ```
//!
//! ## Core Concepts
//!
//! * **Paths ([`path::Path`])**: a parsed sequence of [`path::Segment`]s, either
//!   a field name or an array index. The parser enforces the grammar strictly:
//!   a malformed path never partially succeeds.
//! * **Documents ([`Document`])**: the root wrapper around one dynamic value.
//!   Writes create missing intermediate objects on the way down; array indices
//!   are always bounds-checked and never auto-extend.
//! * **Views ([`Document::at`])**: sub-documents share storage with their
//!   parent, so a write through a view is visible through the parent and any
//!   sibling view of the same subtree.
//! * **Coercions ([`coerce`])**: project a resolved value into a fixed type
//!   (`bool`, `i64`, `u64`, `f64`, `String`, object, array, sub-document),
//!   each with fallible, defaulting, zero-value, and panicking access modes.
//!
//! Documents are deliberately single-threaded (`!Send + !Sync`); callers that
//! need cross-thread access serialize it externally.
//!
//! ```
//! use dotson::Document;
//!
//! let doc = Document::new();
//! doc.set("server.host", "127.0.0.1")?;
//! doc.set("server.ports", vec![8080, 8081])?;
//!
//! assert_eq!(doc.get_string("server.host")?, "127.0.0.1");
//! assert_eq!(doc.get_int("server.ports[1]")?, 8081);
//! assert_eq!(doc.int_or("server.workers", 4), 4);
//! # Ok::<(), dotson::Error>(())
//! ```

pub mod coerce;
pub mod document;
pub mod errors;
pub mod path;

#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub use document::{Document, expand_tilde};
pub use errors::DocError;
pub use path::{Path, Segment};

/// The dynamic value type documents are built from, re-exported from
/// `serde_json`. Object keys are kept in sorted order, so serialization is
/// deterministic.
pub use serde_json::{Map, Value};

/// Result type used throughout the dotson library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dotson library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failures from the underlying codec.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured addressing errors from path parsing, traversal, and coercion.
    #[error(transparent)]
    Doc(#[from] DocError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Doc(_) => "document",
        }
    }

    /// Check if this error indicates a missing key on read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Doc(e) if e.is_not_found())
    }

    /// Check if this error is a path-syntax failure.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Error::Doc(e) if e.is_invalid_path())
    }

    /// Check if this error is an out-of-bounds array index.
    pub fn is_index_out_of_bounds(&self) -> bool {
        matches!(self, Error::Doc(e) if e.is_index_out_of_bounds())
    }

    /// Check if this error is a container/coercion kind disagreement.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::Doc(e) if e.is_type_mismatch())
    }

    /// Check if this error came from JSON encoding or decoding.
    pub fn is_json_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
