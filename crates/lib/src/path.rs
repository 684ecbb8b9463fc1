//! Path representation and the dotted-path grammar.
//!
//! A path addresses a location inside a document as a sequence of segments,
//! written in a small mini-language: parts separated by `.`, where each part
//! is a field name optionally followed by bracketed array indices.
//!
//! ```text
//! part     = name bracket*
//! name     = [A-Za-z0-9_-]*
//! bracket  = "[" [0-9]+ "]"
//! ```
//!
//! A part with an empty name is legal only as the first part, which is what
//! makes bracket-only paths like `"[0]"` work against array roots. The
//! literal path `"."` is not part of the grammar; it is a sentinel for "the
//! root itself" handled by [`crate::Document`]'s read entry points.
//!
//! ```
//! use dotson::path::{Path, Segment};
//!
//! let path: Path = "servers[0].tags[2]".parse()?;
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         Segment::field("servers"),
//!         Segment::Index(0),
//!         Segment::field("tags"),
//!         Segment::Index(2),
//!     ]
//! );
//! assert_eq!(path.to_string(), "servers[0].tags[2]");
//! # Ok::<(), dotson::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DocError;

/// A single parsed step of a path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Object field access: `{"key": value}`.
    Field(String),
    /// Array index access: `[index]`.
    Index(usize),
}

impl Segment {
    /// Create a field segment.
    #[inline]
    pub fn field(name: impl Into<String>) -> Self {
        Segment::Field(name.into())
    }

    /// Returns true if this is a field segment.
    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self, Segment::Field(_))
    }

    /// Returns true if this is an index segment.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Get the field name if this is a field segment.
    #[inline]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Segment::Field(name) => Some(name),
            Segment::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Field(_) => None,
            Segment::Index(i) => Some(*i),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Field(name.to_owned())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Field(name)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// An ordered sequence of segments addressing a location in a document.
///
/// Paths can be parsed from the mini-language with [`Path::parse`] (or
/// `str::parse`), or built programmatically with the builder methods and the
/// [`path!`](crate::path!) macro. An empty path addresses the root and
/// displays as `"."`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Create an empty path addressing the root.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a path from a vector of segments.
    #[inline]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Parse a path string against the grammar.
    ///
    /// Parsing is deterministic and total over the grammar: a violating path
    /// always errors and never partially succeeds.
    pub fn parse(input: &str) -> Result<Self, DocError> {
        if input.is_empty() {
            return Err(DocError::invalid_path(input, "empty path"));
        }

        let mut segments = Vec::new();
        for (i, part) in input.split('.').enumerate() {
            if part.is_empty() {
                return Err(DocError::invalid_path(input, "empty part"));
            }
            parse_part(part, i == 0, input, &mut segments)?;
        }
        Ok(Self(segments))
    }

    /// Append a field segment (builder pattern).
    #[inline]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Field(name.into()));
        self
    }

    /// Append an index segment (builder pattern).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Segment::Index(i));
        self
    }

    /// Push a segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    /// Append another path's segments after this path's.
    pub fn join(&self, other: &Path) -> Path {
        let mut joined = self.clone();
        joined.0.extend(other.0.iter().cloned());
        joined
    }

    /// Append a single segment, returning a new path.
    pub fn child(&self, segment: Segment) -> Path {
        let mut child = self.clone();
        child.0.push(segment);
        child
    }

    /// The path without its last segment, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Path(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The path consisting of the first `n` segments.
    pub fn prefix(&self, n: usize) -> Path {
        Path(self.0[..n].to_vec())
    }

    /// Check if this path is empty (addresses the root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the last segment.
    #[inline]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, ".");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Construct a [`Path`] from a sequence of segment expressions.
///
/// String expressions become field segments, `usize` expressions become
/// index segments:
///
/// ```
/// use dotson::path;
///
/// let p = path!("users", 0, "name");
/// assert_eq!(p.to_string(), "users[0].name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {{
        let mut p = $crate::path::Path::root();
        $(
            p.push($crate::path::Segment::from($segment));
        )+
        p
    }};
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parse one dot-separated part: a name followed by zero or more bracketed
/// indices, nothing else.
fn parse_part(
    part: &str,
    first: bool,
    full: &str,
    segments: &mut Vec<Segment>,
) -> Result<(), DocError> {
    let mut parser = PartParser { input: part, pos: 0 };

    let name = parser.take_while(is_name_char);
    if name.is_empty() && !first {
        return Err(DocError::invalid_path(
            full,
            format!("part {part:?} has an empty field name"),
        ));
    }
    if !name.is_empty() {
        segments.push(Segment::Field(name.to_owned()));
    }

    while parser.peek() == Some('[') {
        parser.advance(1);
        let digits = parser.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(DocError::invalid_path(
                full,
                format!("part {part:?} has an empty or malformed index"),
            ));
        }
        if parser.peek() != Some(']') {
            return Err(DocError::invalid_path(
                full,
                format!("part {part:?} has an unterminated index"),
            ));
        }
        parser.advance(1);
        let index: usize = digits.parse().map_err(|_| {
            DocError::invalid_path(full, format!("index {digits:?} does not fit in usize"))
        })?;
        segments.push(Segment::Index(index));
    }

    match parser.peek() {
        None => Ok(()),
        Some(c) => Err(DocError::invalid_path(
            full,
            format!("unexpected character {c:?} in part {part:?}"),
        )),
    }
}

/// Cursor over a single part string.
struct PartParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PartParser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance(c.len_utf8());
        }
        &self.input[start..self.pos]
    }
}
