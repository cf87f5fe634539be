//! Schema node definitions.
//!
//! This module contains the tree the code generator walks: primitives,
//! arrays, structs, maps and discriminated unions. Nodes are built once by
//! the loader and only read afterwards.

use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered map of property (or tag value) name to child schema.
pub type SchemaMap = IndexMap<String, Schema>;

/// Identifier of a root schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(String);

impl SchemaId {
    /// Creates a schema identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SchemaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Primitive value types a schema can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Exactly `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// Any JSON string.
    String,
}

impl PrimitiveType {
    /// Parses a primitive type from its schema keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the schema keyword for this type.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Required and optional members of an object schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    /// Members that must be present.
    pub required: SchemaMap,
    /// Members that may be absent.
    pub optional: SchemaMap,
}

impl Properties {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required member.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.required.insert(name.into(), schema);
        self
    }

    /// Adds an optional member.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.optional.insert(name.into(), schema);
        self
    }

    /// Returns true if there are no members at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

/// A tagged union: the value of `tag` selects one entry of `mapping`.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    /// Name of the tag property.
    pub tag: String,
    /// Tag value to variant schema. Variants must be `properties` schemas.
    pub mapping: SchemaMap,
    /// Properties declared on the discriminator schema itself.
    pub properties: Properties,
}

impl Discriminator {
    /// Creates a discriminator with no variants.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            mapping: SchemaMap::new(),
            properties: Properties::new(),
        }
    }

    /// Adds a variant.
    #[must_use]
    pub fn variant(mut self, value: impl Into<String>, schema: Schema) -> Self {
        self.mapping.insert(value.into(), schema);
        self
    }

    /// Sets the properties shared by every variant.
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// A validated schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts any value.
    Empty,
    /// A primitive type.
    Type(PrimitiveType),
    /// An array whose elements all match the child schema.
    Elements(Box<Schema>),
    /// An object with named members.
    Properties(Properties),
    /// An object used as a dictionary; every value matches the child.
    Values(Box<Schema>),
    /// A discriminated union.
    Discriminator(Discriminator),
}

impl Schema {
    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Empty => SchemaKind::Empty,
            Self::Type(_) => SchemaKind::Type,
            Self::Elements(_) => SchemaKind::Elements,
            Self::Properties(_) => SchemaKind::Properties,
            Self::Values(_) => SchemaKind::Values,
            Self::Discriminator(_) => SchemaKind::Discriminator,
        }
    }

    /// Shorthand for an array schema.
    #[must_use]
    pub fn elements(inner: Schema) -> Self {
        Self::Elements(Box::new(inner))
    }

    /// Shorthand for a dictionary schema.
    #[must_use]
    pub fn values(inner: Schema) -> Self {
        Self::Values(Box::new(inner))
    }
}

impl From<PrimitiveType> for Schema {
    fn from(prim: PrimitiveType) -> Self {
        Self::Type(prim)
    }
}

impl From<Properties> for Schema {
    fn from(properties: Properties) -> Self {
        Self::Properties(properties)
    }
}

impl From<Discriminator> for Schema {
    fn from(discriminator: Discriminator) -> Self {
        Self::Discriminator(discriminator)
    }
}

/// Kind of a schema node, without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// See [`Schema::Empty`].
    Empty,
    /// See [`Schema::Type`].
    Type,
    /// See [`Schema::Elements`].
    Elements,
    /// See [`Schema::Properties`].
    Properties,
    /// See [`Schema::Values`].
    Values,
    /// See [`Schema::Discriminator`].
    Discriminator,
}

impl SchemaKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Type => "type",
            Self::Elements => "elements",
            Self::Properties => "properties",
            Self::Values => "values",
            Self::Discriminator => "discriminator",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_keyword_roundtrip() {
        for prim in [
            PrimitiveType::Null,
            PrimitiveType::Boolean,
            PrimitiveType::Number,
            PrimitiveType::String,
        ] {
            assert_eq!(PrimitiveType::from_keyword(prim.keyword()), Some(prim));
        }
        assert_eq!(PrimitiveType::from_keyword("int32"), None);
    }

    #[test]
    fn test_schema_kind() {
        assert_eq!(Schema::Empty.kind(), SchemaKind::Empty);
        assert_eq!(
            Schema::elements(PrimitiveType::String.into()).kind(),
            SchemaKind::Elements
        );
        assert_eq!(Schema::from(Properties::new()).kind(), SchemaKind::Properties);
        assert_eq!(SchemaKind::Discriminator.to_string(), "discriminator");
    }

    #[test]
    fn test_properties_builder_keeps_order() {
        let props = Properties::new()
            .required("zeta", Schema::Empty)
            .required("alpha", Schema::Empty)
            .optional("mid", PrimitiveType::Number.into());

        let keys: Vec<&str> = props.required.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(props.optional.len(), 1);
        assert!(!props.is_empty());
        assert!(Properties::new().is_empty());
    }

    #[test]
    fn test_discriminator_builder() {
        let disc = Discriminator::new("type")
            .variant("b", Properties::new().into())
            .variant("a", Properties::new().into());

        assert_eq!(disc.tag, "type");
        let keys: Vec<&str> = disc.mapping.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_schema_id_display() {
        let id = SchemaId::new("http://example.com/user");
        assert_eq!(id.to_string(), "http://example.com/user");
        assert_eq!(id.as_str(), "http://example.com/user");
    }
}
