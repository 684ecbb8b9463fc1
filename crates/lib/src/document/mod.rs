//! Document-level API.
//!
//! A [`Document`] wraps one dynamic JSON value — an object, an array, or a
//! bare scalar — and exposes path-addressed reads, writes, deletes, and typed
//! accessors over it.
//!
//! # Storage model
//!
//! The root value lives in a shared `Rc<RefCell<_>>` handle. Sub-documents
//! created with [`Document::at`] hold the same handle plus a base path, so
//! mutation through a view is immediately visible through the parent and any
//! sibling view of the same subtree. Cloning a `Document` clones the handle,
//! not the data — a clone is another view, not a copy. Use
//! [`Document::snapshot`] for a detached deep copy of the value.
//!
//! Documents are single-threaded by construction (`Rc` is neither `Send` nor
//! `Sync`); no operation suspends, retries, or blocks.
//!
//! # Usage
//!
//! ```
//! use dotson::Document;
//!
//! let doc = Document::new();
//! doc.set("a.b.c", 1)?;
//! doc.set("a.b.d", "moo")?;
//! assert_eq!(doc.to_string(), r#"{"a":{"b":{"c":1,"d":"moo"}}}"#);
//!
//! let view = doc.at("a.b")?;
//! view.set("c", 2)?;
//! assert_eq!(doc.get_int("a.b.c")?, 2);
//! # Ok::<(), dotson::Error>(())
//! ```

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::rc::Rc;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce;
use crate::errors::{DocError, value_type_name};
use crate::path::{Path, Segment};

pub(crate) mod navigate;

/// The root wrapper holding a single dynamic JSON value.
///
/// See the [module docs](self) for the storage model. Operations mutate
/// container slots reachable from the root in place; nothing ever replaces
/// the root container itself, so a document's root kind (object vs. array
/// vs. scalar) is fixed at construction.
#[derive(Clone, Debug)]
pub struct Document {
    root: Rc<RefCell<Value>>,
    base: Path,
}

impl Document {
    /// Create an empty document whose root is an empty object.
    pub fn new() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }

    /// Create a document from an existing value of any kind.
    pub fn from_value(value: Value) -> Self {
        Self {
            root: Rc::new(RefCell::new(value)),
            base: Path::root(),
        }
    }

    /// Create a document from an existing object map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self::from_value(Value::Object(map))
    }

    /// Decode a document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(Self::from_value(serde_json::from_slice(bytes)?))
    }

    /// Decode a document from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    /// Decode a document from a reader. The reader is consumed and dropped
    /// when the call returns.
    pub fn from_reader(reader: impl Read) -> crate::Result<Self> {
        Ok(Self::from_value(serde_json::from_reader(reader)?))
    }

    /// Load a document from a JSON file. A leading `~` in the path expands
    /// to the current user's home directory.
    pub fn from_file(path: impl AsRef<str>) -> crate::Result<Self> {
        let path = expand_tilde(path.as_ref());
        debug!(path = %path.display(), "loading document from file");
        let file = File::open(&path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a document from any serializable value by round-tripping it
    /// through the JSON data model.
    pub fn from_serialize<T: Serialize>(value: &T) -> crate::Result<Self> {
        Ok(Self::from_value(serde_json::to_value(value)?))
    }

    /// Get the value at `path`.
    ///
    /// The returned value is a snapshot clone; use [`Document::at`] for a
    /// live view that shares storage. The literal path `"."` resolves to the
    /// document's own root value.
    pub fn get(&self, path: &str) -> crate::Result<Value> {
        Ok(self.lookup(path)?.0)
    }

    /// Set the value at `path`, overwriting any existing value there.
    ///
    /// Missing intermediate objects are created on the way down; an existing
    /// value of the wrong kind in the way is a type mismatch. Array indices
    /// must be in bounds — writes overwrite elements in place and never
    /// append.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> crate::Result<()> {
        let full = self.write_path(path)?;
        let mut root = self.root.borrow_mut();
        navigate::assign(&mut root, full.segments(), value.into(), &full)?;
        Ok(())
    }

    /// Delete the value at `path`.
    ///
    /// Deleting an absent final field key is a silent success. Deleting an
    /// array element shifts later elements left and shrinks the array (this
    /// holds for arrays at any depth: the walk borrows the parent's actual
    /// storage slot); an out-of-range index is an error.
    pub fn delete(&self, path: &str) -> crate::Result<()> {
        let full = self.write_path(path)?;
        let mut root = self.root.borrow_mut();
        navigate::remove(&mut root, full.segments(), &full)?;
        Ok(())
    }

    /// Get a sub-document view of the value at `path`.
    ///
    /// The view shares storage with this document: writes through either are
    /// visible through both, and through any sibling view of the same
    /// subtree. Errors if the path does not currently resolve.
    pub fn at(&self, path: &str) -> crate::Result<Document> {
        let full = self.read_path(path)?;
        {
            let root = self.root.borrow();
            navigate::resolve(&root, full.segments(), &full)?;
        }
        Ok(Document {
            root: Rc::clone(&self.root),
            base: full,
        })
    }

    /// Deep-copy the value this document addresses.
    ///
    /// Returns `Value::Null` if this is a view whose base no longer resolves.
    pub fn snapshot(&self) -> Value {
        let root = self.root.borrow();
        navigate::resolve(&root, self.base.segments(), &self.base)
            .map(Clone::clone)
            .unwrap_or(Value::Null)
    }

    /// Consume the document and return its value, avoiding a clone when this
    /// is the last handle on the root.
    pub fn into_value(self) -> Value {
        let Document { root, base } = self;
        if base.is_empty() {
            match Rc::try_unwrap(root) {
                Ok(cell) => cell.into_inner(),
                Err(shared) => shared.borrow().clone(),
            }
        } else {
            Document { root, base }.snapshot()
        }
    }

    /// The kind name of the value this document addresses.
    pub fn root_kind(&self) -> &'static str {
        let root = self.root.borrow();
        match navigate::resolve(&root, self.base.segments(), &self.base) {
            Ok(value) => value_type_name(value),
            Err(_) => "null",
        }
    }

    /// Encode to compact JSON bytes. Object keys serialize in sorted order.
    pub fn to_vec(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.snapshot())?)
    }

    /// Encode to pretty-printed JSON bytes with the given indent string.
    pub fn to_vec_pretty(&self, indent: &str) -> crate::Result<Vec<u8>> {
        let value = self.snapshot();
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Encode to a pretty-printed JSON string with a two-space indent.
    pub fn to_string_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    // Typed accessors. Each type has four access modes, all built on `get`:
    // fallible (`get_bool`), defaulting (`bool_or`), zero-value
    // (`bool_or_false`), and panicking (`must_bool`).

    /// Get a boolean at `path`.
    pub fn get_bool(&self, path: &str) -> crate::Result<bool> {
        self.coerced(path, coerce::to_bool)
    }

    /// Get a boolean at `path`, or `default` on any failure.
    pub fn bool_or(&self, path: &str, default: bool) -> bool {
        self.get_bool(path).unwrap_or(default)
    }

    /// Get a boolean at `path`, or `false` on any failure.
    pub fn bool_or_false(&self, path: &str) -> bool {
        self.get_bool(path).unwrap_or(false)
    }

    /// Get a boolean at `path`, panicking on any failure.
    pub fn must_bool(&self, path: &str) -> bool {
        must(self.get_bool(path), "bool", path)
    }

    /// Get a signed integer at `path`. Floats truncate.
    pub fn get_int(&self, path: &str) -> crate::Result<i64> {
        self.coerced(path, coerce::to_i64)
    }

    /// Get a signed integer at `path`, or `default` on any failure.
    pub fn int_or(&self, path: &str, default: i64) -> i64 {
        self.get_int(path).unwrap_or(default)
    }

    /// Get a signed integer at `path`, or `0` on any failure.
    pub fn int_or_zero(&self, path: &str) -> i64 {
        self.get_int(path).unwrap_or(0)
    }

    /// Get a signed integer at `path`, panicking on any failure.
    pub fn must_int(&self, path: &str) -> i64 {
        must(self.get_int(path), "i64", path)
    }

    /// Get an unsigned integer at `path`. Floats truncate; negative values
    /// are a type mismatch.
    pub fn get_uint(&self, path: &str) -> crate::Result<u64> {
        self.coerced(path, coerce::to_u64)
    }

    /// Get an unsigned integer at `path`, or `default` on any failure.
    pub fn uint_or(&self, path: &str, default: u64) -> u64 {
        self.get_uint(path).unwrap_or(default)
    }

    /// Get an unsigned integer at `path`, or `0` on any failure.
    pub fn uint_or_zero(&self, path: &str) -> u64 {
        self.get_uint(path).unwrap_or(0)
    }

    /// Get an unsigned integer at `path`, panicking on any failure.
    pub fn must_uint(&self, path: &str) -> u64 {
        must(self.get_uint(path), "u64", path)
    }

    /// Get a float at `path`. Integers widen.
    pub fn get_float(&self, path: &str) -> crate::Result<f64> {
        self.coerced(path, coerce::to_f64)
    }

    /// Get a float at `path`, or `default` on any failure.
    pub fn float_or(&self, path: &str, default: f64) -> f64 {
        self.get_float(path).unwrap_or(default)
    }

    /// Get a float at `path`, or `0.0` on any failure.
    pub fn float_or_zero(&self, path: &str) -> f64 {
        self.get_float(path).unwrap_or(0.0)
    }

    /// Get a float at `path`, panicking on any failure.
    pub fn must_float(&self, path: &str) -> f64 {
        must(self.get_float(path), "f64", path)
    }

    /// Get a string at `path`. Numbers are not stringified.
    pub fn get_string(&self, path: &str) -> crate::Result<String> {
        self.coerced(path, coerce::to_string)
    }

    /// Get a string at `path`, or `default` on any failure.
    pub fn string_or(&self, path: &str, default: impl Into<String>) -> String {
        self.get_string(path).unwrap_or_else(|_| default.into())
    }

    /// Get a string at `path`, or `""` on any failure.
    pub fn string_or_empty(&self, path: &str) -> String {
        self.get_string(path).unwrap_or_default()
    }

    /// Get a string at `path`, panicking on any failure.
    pub fn must_string(&self, path: &str) -> String {
        must(self.get_string(path), "String", path)
    }

    /// Get an object map at `path`.
    pub fn get_object(&self, path: &str) -> crate::Result<Map<String, Value>> {
        self.coerced(path, coerce::to_object)
    }

    /// Get an object map at `path`, or `default` on any failure.
    pub fn object_or(&self, path: &str, default: Map<String, Value>) -> Map<String, Value> {
        self.get_object(path).unwrap_or(default)
    }

    /// Get an object map at `path`, or an empty map on any failure.
    pub fn object_or_empty(&self, path: &str) -> Map<String, Value> {
        self.get_object(path).unwrap_or_default()
    }

    /// Get an object map at `path`, panicking on any failure.
    pub fn must_object(&self, path: &str) -> Map<String, Value> {
        must(self.get_object(path), "object", path)
    }

    /// Get an array at `path`.
    pub fn get_array(&self, path: &str) -> crate::Result<Vec<Value>> {
        self.coerced(path, coerce::to_array)
    }

    /// Get an array at `path`, or `default` on any failure.
    pub fn array_or(&self, path: &str, default: Vec<Value>) -> Vec<Value> {
        self.get_array(path).unwrap_or(default)
    }

    /// Get an array at `path`, or an empty array on any failure.
    pub fn array_or_empty(&self, path: &str) -> Vec<Value> {
        self.get_array(path).unwrap_or_default()
    }

    /// Get an array at `path`, panicking on any failure.
    pub fn must_array(&self, path: &str) -> Vec<Value> {
        must(self.get_array(path), "array", path)
    }

    /// Get an array of strings at `path`. Null elements map to `""`; any
    /// other non-string element is a type mismatch.
    pub fn get_string_array(&self, path: &str) -> crate::Result<Vec<String>> {
        self.coerced(path, coerce::to_string_array)
    }

    /// Get a sub-document view at `path`, or `default` on any failure.
    pub fn at_or(&self, path: &str, default: Document) -> Document {
        self.at(path).unwrap_or(default)
    }

    /// Get a sub-document view at `path`, or a fresh empty document on any
    /// failure. The fallback is detached — it shares no storage with `self`.
    pub fn at_or_empty(&self, path: &str) -> Document {
        self.at(path).unwrap_or_else(|_| Document::new())
    }

    /// Get a sub-document view at `path`, panicking on any failure.
    pub fn must_at(&self, path: &str) -> Document {
        must(self.at(path), "Document", path)
    }

    /// Wrap each element of the array at `path` as a sub-document view.
    /// Empty on any failure, including a non-array value at `path`.
    pub fn docs_or_empty(&self, path: &str) -> Vec<Document> {
        let (value, full) = match self.lookup(path) {
            Ok(resolved) => resolved,
            Err(_) => return Vec::new(),
        };
        match value {
            Value::Array(items) => (0..items.len())
                .map(|i| Document {
                    root: Rc::clone(&self.root),
                    base: full.child(Segment::Index(i)),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve a read path to its value and full (base-joined) path.
    fn lookup(&self, path: &str) -> crate::Result<(Value, Path)> {
        let full = self.read_path(path)?;
        let root = self.root.borrow();
        let value = navigate::resolve(&root, full.segments(), &full)?;
        Ok((value.clone(), full))
    }

    fn coerced<T>(
        &self,
        path: &str,
        project: impl FnOnce(&Value) -> Result<T, DocError>,
    ) -> crate::Result<T> {
        let (value, full) = self.lookup(path)?;
        Ok(project(&value).map_err(|e| e.with_path(&full))?)
    }

    /// Read paths honor the `"."` sentinel for the document root.
    fn read_path(&self, path: &str) -> Result<Path, DocError> {
        if path == "." {
            Ok(self.base.clone())
        } else {
            Ok(self.base.join(&Path::parse(path)?))
        }
    }

    /// Write paths must parse; `"."` is rejected (the root slot itself is
    /// never assigned or deleted).
    fn write_path(&self, path: &str) -> Result<Path, DocError> {
        Ok(self.base.join(&Path::parse(path)?))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("null"),
        }
    }
}

impl FromStr for Document {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let root = self.root.borrow();
        match navigate::resolve(&root, self.base.segments(), &self.base) {
            Ok(value) => value.serialize(serializer),
            Err(_) => Value::Null.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

/// Replace a leading `~` with the current user's home directory.
///
/// Paths without the prefix, and environments with no resolvable home
/// directory, pass through unchanged.
pub fn expand_tilde(path: &str) -> std::path::PathBuf {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => {
            let mut expanded = home.into_os_string();
            expanded.push(rest);
            std::path::PathBuf::from(expanded)
        }
        _ => std::path::PathBuf::from(path),
    }
}

fn must<T>(result: crate::Result<T>, ty: &'static str, path: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("path {path:?} not found or not coercible to {ty}: {err}"),
    }
}
