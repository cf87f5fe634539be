//! Resolved composite types handed to an [`Emitter`](crate::Emitter).
//!
//! Each descriptor carries the path at the point of emission and the names
//! already generated for its children. Child schemas are never exposed, so
//! emitters only ever deal in names.

use crate::path::NamePath;
use std::collections::BTreeSet;

/// Member name to generated type name, in schema order.
pub type NameMap = Vec<(String, String)>;

/// An object with named members.
#[derive(Debug, Clone)]
pub struct Struct<'a> {
    /// Path of the object schema.
    pub path: &'a NamePath,
    /// Required members.
    pub required: NameMap,
    /// Optional members.
    pub optional: NameMap,
}

/// An array.
#[derive(Debug, Clone)]
pub struct Array<'a> {
    /// Path of the array schema.
    pub path: &'a NamePath,
    /// Generated name of the element type.
    pub elements: String,
}

/// A string-keyed dictionary.
#[derive(Debug, Clone)]
pub struct Values<'a> {
    /// Path of the dictionary schema.
    pub path: &'a NamePath,
    /// Generated name of the value type.
    pub values: String,
}

/// One case of a discriminated union.
#[derive(Debug, Clone)]
pub struct Variant<'a> {
    /// Path of the variant; ends with the variants marker and the tag value.
    pub path: &'a NamePath,
    /// Name of the tag property.
    pub tag_name: String,
    /// Tag value selecting this variant.
    pub tag_value: String,
    /// Required members.
    pub required: NameMap,
    /// Optional members.
    pub optional: NameMap,
}

/// A discriminated union.
#[derive(Debug, Clone)]
pub struct Union<'a> {
    /// Path of the discriminator schema.
    pub path: &'a NamePath,
    /// Generated variant names, in mapping order.
    pub variants: Vec<String>,
}

/// Returns the member names present in both maps.
///
/// Loaded schemas never produce overlaps, but hand-built trees can.
#[must_use]
pub fn overlapping_members(required: &NameMap, optional: &NameMap) -> BTreeSet<String> {
    let required: BTreeSet<&str> = required.iter().map(|(k, _)| k.as_str()).collect();
    optional
        .iter()
        .filter(|(k, _)| required.contains(k.as_str()))
        .map(|(k, _)| k.clone())
        .collect()
}
