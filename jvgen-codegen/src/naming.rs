//! Path-derived type names shared by the bundled emitters.

use crate::error::EmitError;
use crate::path::{NamePath, Segment};
use jvgen_schema::SchemaId;
use std::collections::HashSet;
use std::path::Path;

/// Default prefix for generated type names.
pub const DEFAULT_ROOT_NAME: &str = "Default";

/// Builds a type name from a path: `root` followed by one token per segment.
///
/// Array elements contribute `Element`, dictionary values `Value`, union
/// variants `Variant` and properties their [`property_token`].
#[must_use]
pub fn type_name(root: &str, path: &NamePath) -> String {
    let mut name = String::from(root);
    for segment in path {
        match segment {
            Segment::Elements => name.push_str("Element"),
            Segment::Values => name.push_str("Value"),
            Segment::Variants => name.push_str("Variant"),
            Segment::Property(property) => name.push_str(&property_token(property)),
        }
    }
    name
}

/// Builds a type name, optionally taking the base from the path's schema id
/// instead of `root`.
#[must_use]
pub fn resolve_type_name(root: &str, names_from_ids: bool, path: &NamePath) -> String {
    if names_from_ids {
        type_name(&schema_base_name(root, path.schema_id()), path)
    } else {
        type_name(root, path)
    }
}

/// Returns the token a property key contributes to a type name.
///
/// Keys of the form `[a-z][A-Za-z0-9]*` are capitalized. Any other key is
/// PascalCased and suffixed with `_` and a hash of the raw key, so keys that
/// PascalCase alike (`a_b` and `aB`, `a` and `A`) keep distinct tokens and
/// keys with no ASCII letters still contribute one.
#[must_use]
pub fn property_token(key: &str) -> String {
    if is_plain_key(key) {
        let mut token = key.to_string();
        token[..1].make_ascii_uppercase();
        return token;
    }
    format!("{}_{:08x}", to_pascal_case(key), fnv1a(key.as_bytes()))
}

/// Derives a base name from a root schema identifier.
///
/// Path identifiers contribute their file stem. `fallback` is prepended when
/// the result is empty or starts with a digit.
#[must_use]
pub fn schema_base_name(fallback: &str, id: &SchemaId) -> String {
    let stem = Path::new(id.as_str())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(id.as_str());
    let name = to_pascal_case(stem);
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{fallback}{name}")
    } else {
        name
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// 32-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}

/// Type names declared so far in a run.
///
/// Emitters register every name before writing its declaration, so a name
/// reached from two different paths fails instead of being declared twice.
#[derive(Debug, Clone, Default)]
pub struct DeclaredNames {
    names: HashSet<String>,
}

impl DeclaredNames {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, declared at `path`.
    ///
    /// # Errors
    /// Returns `EmitError::Render` if `name` is empty or already declared.
    pub fn declare(&mut self, name: &str, path: &NamePath) -> Result<(), EmitError> {
        if name.is_empty() {
            return Err(EmitError::render(format!("empty type name at {path}")));
        }
        if !self.names.insert(name.to_string()) {
            return Err(EmitError::render(format!(
                "type name {name} at {path} is already declared"
            )));
        }
        Ok(())
    }

    /// Returns true if `name` has been declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Converts a string to PascalCase.
///
/// Characters other than ASCII letters and digits are dropped and start a
/// new word.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if !c.is_ascii_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a string to snake_case.
///
/// Characters other than ASCII letters and digits become underscores.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_lower = true;
        } else {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_lower = false;
        }
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}
