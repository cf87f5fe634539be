//! TypeScript emitter.

use super::{property_key, quote_string};
use crate::descriptor::{Array, NameMap, Struct, Union, Values, Variant, overlapping_members};
use crate::emitter::Emitter;
use crate::error::EmitError;
use crate::naming::{DEFAULT_ROOT_NAME, DeclaredNames, resolve_type_name};
use crate::path::NamePath;
use std::io::Write;

/// Options for TypeScript generation.
#[derive(Debug, Clone)]
pub struct TypeScriptOptions {
    /// Prefix of every generated type name.
    pub root_name: String,
    /// Take each root's prefix from its schema id instead of `root_name`.
    pub names_from_ids: bool,
}

impl TypeScriptOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            names_from_ids: false,
        }
    }

    /// Sets the prefix of generated type names.
    #[must_use]
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Derives each root's prefix from its schema id.
    #[must_use]
    pub fn names_from_ids(mut self, enabled: bool) -> Self {
        self.names_from_ids = enabled;
        self
    }
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`Emitter`] that outputs TypeScript declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter {
    options: TypeScriptOptions,
    declared: DeclaredNames,
}

impl TypeScriptEmitter {
    /// Creates an emitter with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with the given options.
    #[must_use]
    pub fn with_options(options: TypeScriptOptions) -> Self {
        Self {
            options,
            declared: DeclaredNames::new(),
        }
    }

    fn declare(&mut self, path: &NamePath) -> Result<String, EmitError> {
        let name = resolve_type_name(&self.options.root_name, self.options.names_from_ids, path);
        self.declared.declare(&name, path)?;
        Ok(name)
    }

    /// Renders interface members: required first, then optional.
    fn members(
        &self,
        output: &mut String,
        required: &NameMap,
        optional: &NameMap,
    ) -> Result<(), EmitError> {
        if let Some(key) = overlapping_members(required, optional).into_iter().next() {
            return Err(EmitError::render(format!(
                "member '{key}' is both required and optional"
            )));
        }

        for (key, ty) in required {
            output.push_str(&format!("  {}: {};\n", property_key(key), ty));
        }
        for (key, ty) in optional {
            output.push_str(&format!("  {}?: {};\n", property_key(key), ty));
        }
        Ok(())
    }
}

impl Emitter for TypeScriptEmitter {
    fn primitive_empty(&self) -> String {
        "any".to_string()
    }

    fn primitive_null(&self) -> String {
        "null".to_string()
    }

    fn primitive_boolean(&self) -> String {
        "boolean".to_string()
    }

    fn primitive_number(&self) -> String {
        "number".to_string()
    }

    fn primitive_string(&self) -> String {
        "string".to_string()
    }

    fn emit_struct(
        &mut self,
        out: &mut dyn Write,
        strukt: &Struct<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(strukt.path)?;
        let mut output = String::new();

        output.push_str(&format!("export interface {} {{\n", name));
        self.members(&mut output, &strukt.required, &strukt.optional)?;
        output.push_str("}\n\n");

        out.write_all(output.as_bytes())?;
        Ok(name)
    }

    fn emit_array(&mut self, out: &mut dyn Write, array: &Array<'_>) -> Result<String, EmitError> {
        let name = self.declare(array.path)?;
        writeln!(out, "export type {} = {}[];\n", name, array.elements)?;
        Ok(name)
    }

    fn emit_values(
        &mut self,
        out: &mut dyn Write,
        values: &Values<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(values.path)?;
        let mut output = String::new();

        output.push_str(&format!("export interface {} {{\n", name));
        output.push_str(&format!("  [key: string]: {};\n", values.values));
        output.push_str("}\n\n");

        out.write_all(output.as_bytes())?;
        Ok(name)
    }

    fn emit_variant(
        &mut self,
        out: &mut dyn Write,
        variant: &Variant<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(variant.path)?;
        let mut output = String::new();

        output.push_str(&format!("export interface {} {{\n", name));
        output.push_str(&format!(
            "  {}: {};\n",
            property_key(&variant.tag_name),
            quote_string(&variant.tag_value)
        ));
        self.members(&mut output, &variant.required, &variant.optional)?;
        output.push_str("}\n\n");

        out.write_all(output.as_bytes())?;
        Ok(name)
    }

    fn emit_union(&mut self, out: &mut dyn Write, union: &Union<'_>) -> Result<String, EmitError> {
        let name = self.declare(union.path)?;
        let mut output = String::new();

        if union.variants.is_empty() {
            output.push_str(&format!("export type {} = never;\n\n", name));
        } else {
            output.push_str(&format!("export type {} =\n", name));
            for variant in &union.variants {
                output.push_str(&format!("  | {}\n", variant));
            }
            // Terminate the last alternative.
            output.pop();
            output.push_str(";\n\n");
        }

        out.write_all(output.as_bytes())?;
        Ok(name)
    }
}
