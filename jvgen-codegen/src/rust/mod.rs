//! Rust code generation.
//!
//! Emits serde-annotated type definitions as token streams. The output is
//! valid Rust but not pretty-printed; run it through `rustfmt`.

pub mod emitter;

pub use emitter::{RustEmitter, RustOptions};

use crate::error::EmitError;
use crate::naming::{property_token, to_snake_case};
use syn::Ident;

/// Parses a generated type name into a type.
///
/// # Errors
/// Returns `EmitError::Render` if `name` is not a valid Rust type.
pub fn parse_type(name: &str) -> Result<syn::Type, EmitError> {
    syn::parse_str(name).map_err(|e| EmitError::render(format!("invalid type '{name}': {e}")))
}

/// Parses a type name into an identifier.
///
/// # Errors
/// Returns `EmitError::Render` if `name` is not a valid identifier.
pub fn type_ident(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str(name)
        .map_err(|e| EmitError::render(format!("invalid type name '{name}': {e}")))
}

/// Derives a struct field identifier from a JSON member name.
///
/// Keywords become raw identifiers, except `self`, `Self`, `crate` and
/// `super`, which cannot be raw and get a trailing underscore instead.
///
/// # Errors
/// Returns `EmitError::Render` if no valid identifier can be formed.
pub fn field_ident(key: &str) -> Result<Ident, EmitError> {
    let mut snake = to_snake_case(key);
    if snake.is_empty() {
        snake.push_str("field");
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        snake.insert(0, '_');
    }
    if matches!(snake.as_str(), "self" | "crate" | "super") {
        snake.push('_');
    }
    syn::parse_str::<Ident>(&snake)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{snake}")))
        .map_err(|e| EmitError::render(format!("invalid field name '{key}': {e}")))
}

/// Derives an enum variant identifier from a tag value.
///
/// Uses the same token as a property segment, so distinct tag values give
/// distinct variants.
///
/// # Errors
/// Returns `EmitError::Render` if no valid identifier can be formed.
pub fn variant_ident(tag_value: &str) -> Result<Ident, EmitError> {
    let mut token = property_token(tag_value);
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        token.insert(0, 'V');
    }
    syn::parse_str::<Ident>(&token)
        .or_else(|_| syn::parse_str::<Ident>(&format!("{token}_")))
        .map_err(|e| EmitError::render(format!("invalid tag value '{tag_value}': {e}")))
}
