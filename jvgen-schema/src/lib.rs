//! # jvgen Schema
//!
//! Schema node model and registry for jvgen.
//!
//! This crate provides:
//! - The schema tree consumed by the code generator
//! - Loading of JSON schema documents into that tree
//! - An ordered registry of root schemas

pub mod document;
pub mod error;
pub mod registry;
pub mod types;

pub use document::{SchemaDocument, load_root, parse_document, parse_root};
pub use error::{ParseError, SchemaError};
pub use registry::{Registry, RootSchema};
pub use types::{
    Discriminator, PrimitiveType, Properties, Schema, SchemaId, SchemaKind, SchemaMap,
};
