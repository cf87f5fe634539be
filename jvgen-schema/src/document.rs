//! JSON schema documents.
//!
//! Decodes the on-disk JSON form with serde and converts it into the
//! [`Schema`] tree. Only the structural checks needed to pick a node kind are
//! performed here; anything beyond that is assumed to have been validated
//! upstream.

use crate::error::ParseError;
use crate::registry::RootSchema;
use crate::types::{Discriminator, PrimitiveType, Properties, Schema, SchemaId, SchemaMap};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// A schema exactly as written in a JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDocument {
    /// Root identifier. Only meaningful on the root node.
    pub id: Option<String>,
    /// Primitive type keyword.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Array element schema.
    pub elements: Option<Box<SchemaDocument>>,
    /// Required members.
    pub properties: Option<IndexMap<String, SchemaDocument>>,
    /// Optional members.
    pub optional_properties: Option<IndexMap<String, SchemaDocument>>,
    /// Dictionary value schema.
    pub values: Option<Box<SchemaDocument>>,
    /// Tagged union definition.
    pub discriminator: Option<DiscriminatorDocument>,
}

/// The `discriminator` keyword of a schema document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiscriminatorDocument {
    /// Name of the tag property.
    pub property_name: String,
    /// Tag value to variant schema.
    #[serde(default)]
    pub mapping: IndexMap<String, SchemaDocument>,
}

impl SchemaDocument {
    /// Converts the document into a schema tree.
    ///
    /// # Errors
    /// Returns `ParseError` if a node mixes incompatible keywords, uses an
    /// unknown type, or declares `id` below the root.
    pub fn to_schema(&self) -> Result<Schema, ParseError> {
        convert(self, "", true)
    }
}

/// Parses a schema document from a JSON string.
///
/// # Errors
/// Returns `ParseError::Json` if the input is not a valid schema document.
pub fn parse_document(json: &str) -> Result<SchemaDocument, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a root schema from a JSON string.
///
/// The root's identifier is the document's `id`, or `fallback_id` when the
/// document has none.
///
/// # Errors
/// Returns `ParseError` if decoding or conversion fails.
pub fn parse_root(json: &str, fallback_id: impl Into<String>) -> Result<RootSchema, ParseError> {
    let document = parse_document(json)?;
    let schema = document.to_schema()?;
    let id = match document.id {
        Some(id) => SchemaId::new(id),
        None => SchemaId::new(fallback_id),
    };
    Ok(RootSchema::new(id, schema))
}

/// Reads and parses a root schema from a file.
///
/// Documents without an `id` are identified by their path.
///
/// # Errors
/// Returns `ParseError` if reading, decoding or conversion fails.
pub fn load_root(path: &Path) -> Result<RootSchema, ParseError> {
    let json = std::fs::read_to_string(path)?;
    tracing::debug!("loaded schema document {}", path.display());
    parse_root(&json, path.display().to_string())
}

fn convert(doc: &SchemaDocument, location: &str, is_root: bool) -> Result<Schema, ParseError> {
    if !is_root && doc.id.is_some() {
        return Err(ParseError::invalid_structure(
            display_location(location),
            "`id` is only allowed on root schemas",
        ));
    }

    let has_properties = doc.properties.is_some() || doc.optional_properties.is_some();
    let forms = [
        ("type", doc.type_name.is_some()),
        ("elements", doc.elements.is_some()),
        ("values", doc.values.is_some()),
        ("discriminator", doc.discriminator.is_some()),
    ];
    let present: Vec<&str> = forms
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect();

    if present.len() > 1 {
        return Err(ParseError::invalid_structure(
            display_location(location),
            format!("conflicting keywords: {}", present.join(", ")),
        ));
    }
    if has_properties && !present.is_empty() && doc.discriminator.is_none() {
        return Err(ParseError::invalid_structure(
            display_location(location),
            format!("`properties` cannot be combined with `{}`", present[0]),
        ));
    }

    if let Some(type_name) = &doc.type_name {
        return PrimitiveType::from_keyword(type_name)
            .map(Schema::Type)
            .ok_or_else(|| ParseError::unknown_type(type_name, display_location(location)));
    }

    if let Some(elements) = &doc.elements {
        let child = convert(elements, &format!("{location}/elements"), false)?;
        return Ok(Schema::elements(child));
    }

    if let Some(values) = &doc.values {
        let child = convert(values, &format!("{location}/values"), false)?;
        return Ok(Schema::values(child));
    }

    let properties = convert_properties(doc, location)?;

    if let Some(discriminator) = &doc.discriminator {
        if discriminator.property_name.is_empty() {
            return Err(ParseError::invalid_structure(
                display_location(location),
                "`discriminator.propertyName` must not be empty",
            ));
        }
        let mapping = convert_map(
            &discriminator.mapping,
            &format!("{location}/discriminator/mapping"),
        )?;
        return Ok(Schema::Discriminator(Discriminator {
            tag: discriminator.property_name.clone(),
            mapping,
            properties,
        }));
    }

    if has_properties {
        Ok(Schema::Properties(properties))
    } else {
        Ok(Schema::Empty)
    }
}

fn convert_properties(doc: &SchemaDocument, location: &str) -> Result<Properties, ParseError> {
    let required = match &doc.properties {
        Some(map) => convert_map(map, &format!("{location}/properties"))?,
        None => SchemaMap::new(),
    };
    let optional = match &doc.optional_properties {
        Some(map) => convert_map(map, &format!("{location}/optionalProperties"))?,
        None => SchemaMap::new(),
    };

    if let Some(key) = required.keys().find(|key| optional.contains_key(*key)) {
        return Err(ParseError::invalid_structure(
            display_location(location),
            format!("property '{key}' is both required and optional"),
        ));
    }

    Ok(Properties { required, optional })
}

fn convert_map(
    map: &IndexMap<String, SchemaDocument>,
    location: &str,
) -> Result<SchemaMap, ParseError> {
    map.iter()
        .map(|(key, doc)| {
            let schema = convert(doc, &format!("{location}/{key}"), false)?;
            Ok((key.clone(), schema))
        })
        .collect()
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "/".to_string()
    } else {
        location.to_string()
    }
}
