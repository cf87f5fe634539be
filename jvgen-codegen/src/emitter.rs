//! The per-language rendering contract.

use crate::descriptor::{Array, Struct, Union, Values, Variant};
use crate::error::EmitError;
use std::io::Write;

/// Handles producing code for a particular target language.
///
/// The walker asks for primitive names directly and hands every composite
/// node to one of the `emit_*` methods once all of its children have been
/// emitted. Each `emit_*` call writes the type's source to `out` and returns
/// the generated type name, which the walker then embeds in the parent.
/// Returned names must be non-empty and stable for the whole run.
pub trait Emitter {
    /// Returns the name of the "empty" or "top" type.
    fn primitive_empty(&self) -> String;

    /// Returns the name of the "null" type.
    fn primitive_null(&self) -> String;

    /// Returns the name of the "boolean" type.
    fn primitive_boolean(&self) -> String;

    /// Returns the name of the "number" type.
    fn primitive_number(&self) -> String;

    /// Returns the name of the "string" type.
    fn primitive_string(&self) -> String;

    /// Outputs a struct, returning the name of the emitted type.
    ///
    /// # Errors
    /// Returns `EmitError` if writing or rendering fails.
    fn emit_struct(&mut self, out: &mut dyn Write, strukt: &Struct<'_>)
    -> Result<String, EmitError>;

    /// Outputs an array, returning the name of the emitted type.
    ///
    /// # Errors
    /// Returns `EmitError` if writing or rendering fails.
    fn emit_array(&mut self, out: &mut dyn Write, array: &Array<'_>) -> Result<String, EmitError>;

    /// Outputs a dictionary, returning the name of the emitted type.
    ///
    /// # Errors
    /// Returns `EmitError` if writing or rendering fails.
    fn emit_values(&mut self, out: &mut dyn Write, values: &Values<'_>)
    -> Result<String, EmitError>;

    /// Outputs one variant of a discriminated union, returning the name of
    /// the emitted type.
    ///
    /// # Errors
    /// Returns `EmitError` if writing or rendering fails.
    fn emit_variant(
        &mut self,
        out: &mut dyn Write,
        variant: &Variant<'_>,
    ) -> Result<String, EmitError>;

    /// Outputs a discriminated union, returning the name of the emitted type.
    ///
    /// # Errors
    /// Returns `EmitError` if writing or rendering fails.
    fn emit_union(&mut self, out: &mut dyn Write, union: &Union<'_>) -> Result<String, EmitError>;
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn primitive_empty(&self) -> String {
        (**self).primitive_empty()
    }

    fn primitive_null(&self) -> String {
        (**self).primitive_null()
    }

    fn primitive_boolean(&self) -> String {
        (**self).primitive_boolean()
    }

    fn primitive_number(&self) -> String {
        (**self).primitive_number()
    }

    fn primitive_string(&self) -> String {
        (**self).primitive_string()
    }

    fn emit_struct(
        &mut self,
        out: &mut dyn Write,
        strukt: &Struct<'_>,
    ) -> Result<String, EmitError> {
        (**self).emit_struct(out, strukt)
    }

    fn emit_array(&mut self, out: &mut dyn Write, array: &Array<'_>) -> Result<String, EmitError> {
        (**self).emit_array(out, array)
    }

    fn emit_values(
        &mut self,
        out: &mut dyn Write,
        values: &Values<'_>,
    ) -> Result<String, EmitError> {
        (**self).emit_values(out, values)
    }

    fn emit_variant(
        &mut self,
        out: &mut dyn Write,
        variant: &Variant<'_>,
    ) -> Result<String, EmitError> {
        (**self).emit_variant(out, variant)
    }

    fn emit_union(&mut self, out: &mut dyn Write, union: &Union<'_>) -> Result<String, EmitError> {
        (**self).emit_union(out, union)
    }
}
