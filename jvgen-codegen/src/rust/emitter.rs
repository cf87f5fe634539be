//! Rust emitter.

use super::{field_ident, parse_type, type_ident, variant_ident};
use crate::descriptor::{Array, NameMap, Struct, Union, Values, Variant, overlapping_members};
use crate::emitter::Emitter;
use crate::error::EmitError;
use crate::naming::{DEFAULT_ROOT_NAME, DeclaredNames, resolve_type_name};
use crate::path::{NamePath, Segment};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use syn::ext::IdentExt;

/// Options for Rust generation.
#[derive(Debug, Clone)]
pub struct RustOptions {
    /// Prefix of every generated type name.
    pub root_name: String,
    /// Take each root's prefix from its schema id instead of `root_name`.
    pub names_from_ids: bool,
}

impl RustOptions {
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

impl Default for RustOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Variants emitted for a union that has not been emitted yet.
#[derive(Debug, Default)]
struct PendingUnion {
    tag_name: String,
    tag_values: HashMap<String, String>,
}

/// An [`Emitter`] that outputs serde-annotated Rust types.
///
/// A union enum needs its tag property and each variant's tag value, which
/// the union descriptor does not carry, so they are collected from the
/// variant calls that precede it, keyed by the union's path.
#[derive(Debug, Default)]
pub struct RustEmitter {
    options: RustOptions,
    declared: DeclaredNames,
    pending: HashMap<Vec<Segment>, PendingUnion>,
}

impl RustEmitter {
    /// Creates an emitter with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with the given options.
    #[must_use]
    pub fn with_options(options: RustOptions) -> Self {
        Self {
            options,
            declared: DeclaredNames::new(),
            pending: HashMap::new(),
        }
    }

    fn declare(&mut self, path: &NamePath) -> Result<String, EmitError> {
        let name = resolve_type_name(&self.options.root_name, self.options.names_from_ids, path);
        self.declared.declare(&name, path)?;
        Ok(name)
    }

    fn fields(required: &NameMap, optional: &NameMap) -> Result<Vec<TokenStream>, EmitError> {
        if let Some(key) = overlapping_members(required, optional).into_iter().next() {
            return Err(EmitError::render(format!(
                "member '{key}' is both required and optional"
            )));
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(required.len() + optional.len());
        let members = required
            .iter()
            .map(|member| (member, false))
            .chain(optional.iter().map(|member| (member, true)));

        for ((key, ty), is_optional) in members {
            let ident = field_ident(key)?;
            let unraw = ident.unraw().to_string();
            if !seen.insert(unraw.clone()) {
                return Err(EmitError::render(format!(
                    "member '{key}' collides with another member as field '{unraw}'"
                )));
            }

            let ty = parse_type(ty)?;
            let rename = if unraw == *key {
                quote! {}
            } else {
                quote! { #[serde(rename = #key)] }
            };

            fields.push(if is_optional {
                quote! {
                    #rename
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    pub #ident: Option<#ty>
                }
            } else {
                quote! {
                    #rename
                    pub #ident: #ty
                }
            });
        }

        Ok(fields)
    }

    fn write_struct(
        out: &mut dyn Write,
        name: &str,
        required: &NameMap,
        optional: &NameMap,
    ) -> Result<(), EmitError> {
        let ident = type_ident(name)?;
        let fields = Self::fields(required, optional)?;
        let tokens = quote! {
            #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
            pub struct #ident {
                #(#fields,)*
            }
        };
        writeln!(out, "{tokens}\n")?;
        Ok(())
    }
}

impl Emitter for RustEmitter {
    fn primitive_empty(&self) -> String {
        "serde_json::Value".to_string()
    }

    fn primitive_null(&self) -> String {
        "()".to_string()
    }

    fn primitive_boolean(&self) -> String {
        "bool".to_string()
    }

    fn primitive_number(&self) -> String {
        "f64".to_string()
    }

    fn primitive_string(&self) -> String {
        "String".to_string()
    }

    fn emit_struct(
        &mut self,
        out: &mut dyn Write,
        strukt: &Struct<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(strukt.path)?;
        Self::write_struct(out, &name, &strukt.required, &strukt.optional)?;
        Ok(name)
    }

    fn emit_array(&mut self, out: &mut dyn Write, array: &Array<'_>) -> Result<String, EmitError> {
        let name = self.declare(array.path)?;
        let ident = type_ident(&name)?;
        let elements = parse_type(&array.elements)?;

        let tokens = quote! {
            pub type #ident = Vec<#elements>;
        };
        writeln!(out, "{tokens}\n")?;
        Ok(name)
    }

    fn emit_values(
        &mut self,
        out: &mut dyn Write,
        values: &Values<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(values.path)?;
        let ident = type_ident(&name)?;
        let value = parse_type(&values.values)?;

        let tokens = quote! {
            pub type #ident = std::collections::HashMap<String, #value>;
        };
        writeln!(out, "{tokens}\n")?;
        Ok(name)
    }

    fn emit_variant(
        &mut self,
        out: &mut dyn Write,
        variant: &Variant<'_>,
    ) -> Result<String, EmitError> {
        let name = self.declare(variant.path)?;
        Self::write_struct(out, &name, &variant.required, &variant.optional)?;

        let segments = variant.path.segments();
        let union_path = segments[..segments.len().saturating_sub(2)].to_vec();
        let pending = self.pending.entry(union_path).or_default();
        pending.tag_name.clone_from(&variant.tag_name);
        pending
            .tag_values
            .insert(name.clone(), variant.tag_value.clone());
        Ok(name)
    }

    fn emit_union(&mut self, out: &mut dyn Write, union: &Union<'_>) -> Result<String, EmitError> {
        let name = self.declare(union.path)?;
        let ident = type_ident(&name)?;
        let pending = self
            .pending
            .remove(union.path.segments())
            .unwrap_or_default();

        let mut seen = HashSet::new();
        let mut cases = Vec::with_capacity(union.variants.len());
        for variant in &union.variants {
            let tag_value = pending.tag_values.get(variant).ok_or_else(|| {
                EmitError::render(format!("union {name} references unknown variant {variant}"))
            })?;
            let case = variant_ident(tag_value)?;
            if !seen.insert(case.to_string()) {
                return Err(EmitError::render(format!(
                    "tag value '{tag_value}' collides with another variant of {name}"
                )));
            }
            let ty = parse_type(variant)?;
            cases.push(quote! {
                #[serde(rename = #tag_value)]
                #case(#ty)
            });
        }

        let tag = if cases.is_empty() {
            quote! {}
        } else {
            let tag_name = &pending.tag_name;
            quote! { #[serde(tag = #tag_name)] }
        };
        let tokens = quote! {
            #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
            #tag
            pub enum #ident {
                #(#cases,)*
            }
        };
        writeln!(out, "{tokens}\n")?;
        Ok(name)
    }
}
