//! Traversal and mutation of the in-memory value tree.
//!
//! All three walks step segment by segment from a root value. Errors carry
//! the path of the container where the walk failed, built from the full
//! path's prefix at that depth.

use serde_json::{Map, Value};

use crate::errors::DocError;
use crate::path::{Path, Segment};

/// Resolve a segment sequence against a root value, read-only.
pub(crate) fn resolve<'a>(
    root: &'a Value,
    segments: &[Segment],
    full: &Path,
) -> Result<&'a Value, DocError> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        current = match segment {
            Segment::Field(name) => match current {
                Value::Object(map) => map
                    .get(name)
                    .ok_or_else(|| DocError::key_not_found(full.prefix(depth), name))?,
                other => return Err(DocError::type_mismatch(full.prefix(depth), "object", other)),
            },
            Segment::Index(idx) => match current {
                Value::Array(items) => {
                    if *idx >= items.len() {
                        return Err(DocError::index_out_of_bounds(
                            full.prefix(depth),
                            *idx,
                            items.len(),
                        ));
                    }
                    &items[*idx]
                }
                other => return Err(DocError::type_mismatch(full.prefix(depth), "array", other)),
            },
        };
    }
    Ok(current)
}

/// Write a value at a segment sequence, creating missing intermediate
/// objects on the way down.
///
/// Only *missing* field keys auto-create; an existing value of the wrong
/// kind in the walk is a type mismatch, and array indices are always
/// bounds-checked (no auto-extend, no append-on-write). The final segment
/// overwrites its slot destructively.
pub(crate) fn assign(
    root: &mut Value,
    segments: &[Segment],
    value: Value,
    full: &Path,
) -> Result<(), DocError> {
    let (last, walk) = match segments.split_last() {
        Some(split) => split,
        // The splitter never produces an empty sequence.
        None => return Err(DocError::invalid_path(full.to_string(), "empty path")),
    };

    let mut current = root;
    for (depth, segment) in walk.iter().enumerate() {
        current = match segment {
            Segment::Field(name) => match current {
                Value::Object(map) => map
                    .entry(name.clone())
                    .or_insert_with(|| Value::Object(Map::new())),
                other => return Err(DocError::type_mismatch(full.prefix(depth), "object", other)),
            },
            Segment::Index(idx) => step_index_mut(current, *idx, full, depth)?,
        };
    }

    match last {
        Segment::Field(name) => match current {
            Value::Object(map) => {
                map.insert(name.clone(), value);
                Ok(())
            }
            other => Err(DocError::type_mismatch(
                full.prefix(walk.len()),
                "object",
                other,
            )),
        },
        Segment::Index(idx) => {
            let slot = step_index_mut(current, *idx, full, walk.len())?;
            *slot = value;
            Ok(())
        }
    }
}

/// Delete the slot addressed by a segment sequence.
///
/// The walk to the parent follows the read rules exactly (no auto-creation).
/// Removing an absent final field key is a silent success; removing an array
/// element shifts the elements after it left and shrinks the array, and an
/// out-of-range index is an error.
pub(crate) fn remove(root: &mut Value, segments: &[Segment], full: &Path) -> Result<(), DocError> {
    let (last, walk) = match segments.split_last() {
        Some(split) => split,
        None => return Err(DocError::invalid_path(full.to_string(), "empty path")),
    };

    let mut current = root;
    for (depth, segment) in walk.iter().enumerate() {
        current = match segment {
            Segment::Field(name) => match current {
                Value::Object(map) => map
                    .get_mut(name)
                    .ok_or_else(|| DocError::key_not_found(full.prefix(depth), name))?,
                other => return Err(DocError::type_mismatch(full.prefix(depth), "object", other)),
            },
            Segment::Index(idx) => step_index_mut(current, *idx, full, depth)?,
        };
    }

    match last {
        Segment::Field(name) => match current {
            Value::Object(map) => {
                // Absent key: deleting nothing is success, not an error.
                map.remove(name);
                Ok(())
            }
            other => Err(DocError::type_mismatch(
                full.prefix(walk.len()),
                "object",
                other,
            )),
        },
        Segment::Index(idx) => match current {
            Value::Array(items) => {
                if *idx >= items.len() {
                    return Err(DocError::index_out_of_bounds(
                        full.prefix(walk.len()),
                        *idx,
                        items.len(),
                    ));
                }
                items.remove(*idx);
                Ok(())
            }
            other => Err(DocError::type_mismatch(
                full.prefix(walk.len()),
                "array",
                other,
            )),
        },
    }
}

/// Bounds-checked mutable step into an array element.
fn step_index_mut<'a>(
    current: &'a mut Value,
    idx: usize,
    full: &Path,
    depth: usize,
) -> Result<&'a mut Value, DocError> {
    match current {
        Value::Array(items) => {
            let len = items.len();
            if idx >= len {
                return Err(DocError::index_out_of_bounds(full.prefix(depth), idx, len));
            }
            Ok(&mut items[idx])
        }
        other => Err(DocError::type_mismatch(full.prefix(depth), "array", other)),
    }
}
