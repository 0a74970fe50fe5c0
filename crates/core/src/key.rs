//! Paths and document keys
//!
//! This module defines the addressing types of the document model:
//!
//! - [`ResourcePath`]: slash-separated path to a collection or document
//! - [`DocumentKey`]: a resource path that addresses a document
//! - [`FieldPath`]: dot-separated path to a field inside a document
//!
//! ## Contract
//!
//! - Path segments are never empty (`"rooms//a"` is rejected) and never
//!   contain `/`
//! - A document key has an even, non-zero number of segments
//!   (`collection/doc`, `collection/doc/sub/doc`, ...)
//! - Field paths have at least one segment
//! - A field path's canonical string quotes any segment that is not a
//!   plain identifier, so [`FieldPath::from_server_format`] parses it back
//!   to the same segments

use crate::error::{ModelError, Result};

// ============================================================================
// ResourcePath
// ============================================================================

/// Slash-separated path to a collection or a document
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// The root path (no segments)
    pub fn empty() -> Self {
        ResourcePath::default()
    }

    /// Build a path from individual segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.iter().any(|s| !is_valid_path_segment(s)) {
            return Err(ModelError::InvalidPath(format!("{:?}", segments)));
        }
        Ok(ResourcePath { segments })
    }

    /// Parse a slash-separated path. The empty string is the root path.
    ///
    /// ```
    /// use tessera_core::ResourcePath;
    ///
    /// let path = ResourcePath::from_string("rooms/eros/messages").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert!(ResourcePath::from_string("rooms//eros").is_err());
    /// ```
    pub fn from_string(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(ResourcePath::empty());
        }
        if path.split('/').any(str::is_empty) {
            return Err(ModelError::InvalidPath(path.to_string()));
        }
        Ok(ResourcePath {
            segments: path.split('/').map(str::to_string).collect(),
        })
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path without its last segment
    pub fn pop_last(&self) -> ResourcePath {
        let mut segments = self.segments.clone();
        segments.pop();
        ResourcePath { segments }
    }

    /// Path with one more segment appended
    pub fn child(&self, segment: &str) -> Result<ResourcePath> {
        if !is_valid_path_segment(segment) {
            return Err(ModelError::InvalidPath(format!("{}/{}", self, segment)));
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(ResourcePath { segments })
    }

    /// Concatenate two paths
    pub fn append(&self, other: &ResourcePath) -> ResourcePath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        ResourcePath { segments }
    }

    /// Slash-joined representation
    pub fn canonical_string(&self) -> String {
        self.segments.join("/")
    }
}

fn is_valid_path_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('/')
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

// ============================================================================
// DocumentKey
// ============================================================================

/// Path that addresses a single document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentKey {
    path: ResourcePath,
}

impl DocumentKey {
    /// True if `path` has the shape of a document key
    pub fn is_document_key(path: &ResourcePath) -> bool {
        !path.is_empty() && path.len() % 2 == 0
    }

    /// Wrap a path, checking it addresses a document
    pub fn from_path(path: ResourcePath) -> Result<Self> {
        if !Self::is_document_key(&path) {
            return Err(ModelError::InvalidDocumentKey(path.canonical_string()));
        }
        Ok(DocumentKey { path })
    }

    /// Parse `"collection/doc"` style strings
    pub fn from_path_string(path: &str) -> Result<Self> {
        Self::from_path(ResourcePath::from_string(path)?)
    }

    /// Build from individual segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_path(ResourcePath::from_segments(segments)?)
    }

    /// Full resource path of the document
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Path of the collection containing the document
    pub fn collection_path(&self) -> ResourcePath {
        self.path.pop_last()
    }

    /// Final path segment
    pub fn document_id(&self) -> &str {
        // Document keys always have at least two segments
        self.path.last_segment().unwrap_or_default()
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.path.fmt(f)
    }
}

// ============================================================================
// FieldPath
// ============================================================================

/// Dot-separated path to a (possibly nested) field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Build from individual segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(ModelError::InvalidFieldPath(segments.join(".")));
        }
        Ok(FieldPath { segments })
    }

    /// Parse `"a.b.c"`. Every dot separates segments; no quoting.
    pub fn from_dotted(path: &str) -> Result<Self> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(ModelError::InvalidFieldPath(path.to_string()));
        }
        Ok(FieldPath {
            segments: path.split('.').map(str::to_string).collect(),
        })
    }

    /// All segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment
    pub fn first_segment(&self) -> &str {
        &self.segments[0]
    }

    /// Path without its first segment, or `None` for single-segment paths
    pub fn pop_first(&self) -> Option<FieldPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(FieldPath {
            segments: self.segments[1..].to_vec(),
        })
    }

    /// Parse the canonical form produced by [`FieldPath::canonical_string`].
    ///
    /// Backticks quote a segment, and inside them `.` is literal. A
    /// backslash escapes the next character.
    ///
    /// ```
    /// use tessera_core::FieldPath;
    ///
    /// let path = FieldPath::from_server_format("a.`b.c`").unwrap();
    /// assert_eq!(path.segments(), &["a", "b.c"]);
    /// assert!(FieldPath::from_server_format("`open").is_err());
    /// ```
    pub fn from_server_format(path: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidFieldPath(path.to_string());
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut chars = path.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => current.push(chars.next().ok_or_else(invalid)?),
                '`' => quoted = !quoted,
                '.' if !quoted => {
                    if current.is_empty() {
                        return Err(invalid());
                    }
                    segments.push(std::mem::take(&mut current));
                }
                c => current.push(c),
            }
        }
        if quoted || current.is_empty() {
            return Err(invalid());
        }
        segments.push(current);
        Ok(FieldPath { segments })
    }

    /// Dot-joined representation, quoting segments that are not identifiers
    pub fn canonical_string(&self) -> String {
        self.segments
            .iter()
            .map(|s| quote_field_segment(s))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote_field_segment(segment: &str) -> String {
    if is_identifier(segment) {
        return segment.to_string();
    }
    let mut quoted = String::with_capacity(segment.len() + 2);
    quoted.push('`');
    for c in segment.chars() {
        if c == '\\' || c == '`' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('`');
    quoted
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_string())
    }
}
