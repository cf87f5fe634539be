//! Traversal position used to name anonymous types.
//!
//! Schemas carry no type names below the root, so every generated type is
//! named after the route taken from its root schema. The walker owns the
//! path and mutates it in lockstep with the recursion; emitters only read it.

use jvgen_schema::SchemaId;
use std::fmt;

/// One step of descent into a composite schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Into the element schema of an array.
    Elements,
    /// Into the value schema of a dictionary.
    Values,
    /// Into the variants of a discriminated union.
    Variants,
    /// Into a named member, or a union variant keyed by its tag value.
    Property(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elements => f.write_str("elements"),
            Self::Values => f.write_str("values"),
            Self::Variants => f.write_str("variants"),
            Self::Property(name) => f.write_str(name),
        }
    }
}

/// Route from a root schema to the node being visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePath {
    schema_id: SchemaId,
    segments: Vec<Segment>,
}

impl NamePath {
    /// Creates an empty path rooted at the given schema.
    #[must_use]
    pub fn new(schema_id: SchemaId) -> Self {
        Self {
            schema_id,
            segments: Vec::new(),
        }
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Removes the last segment.
    ///
    /// Pushes and pops are always balanced by the walker.
    pub fn pop(&mut self) {
        let popped = self.segments.pop();
        debug_assert!(popped.is_some(), "pop on an empty NamePath");
    }

    /// Returns the identifier of the root schema.
    #[must_use]
    pub fn schema_id(&self) -> &SchemaId {
        &self.schema_id
    }

    /// Returns the segments from the root downwards.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates the segments from the root downwards.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true at the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> IntoIterator for &'a NamePath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#", self.schema_id)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
