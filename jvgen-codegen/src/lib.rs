//! # jvgen Codegen
//!
//! Type generation from JSON Type Definition schemas.
//!
//! This crate provides:
//! - A depth-first walker over the schema tree ([`Encoder`])
//! - The per-language [`Emitter`] contract and its descriptors
//! - Bundled TypeScript and Rust emitters

pub mod descriptor;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod lang;
pub mod naming;
pub mod path;
pub mod rust;
pub mod typescript;

pub use descriptor::{Array, NameMap, Struct, Union, Values, Variant};
pub use emitter::Emitter;
pub use encoder::Encoder;
pub use error::{CodegenError, EmitError};
pub use lang::Lang;
pub use path::{NamePath, Segment};
pub use rust::{RustEmitter, RustOptions};
pub use typescript::{TypeScriptEmitter, TypeScriptOptions};

use jvgen_schema::Registry;
use std::path::Path;

/// Generates code for every schema in `registry`.
///
/// # Returns
/// Generated source as a string.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn generate<E: Emitter>(registry: &Registry, emitter: E) -> Result<String, CodegenError> {
    let mut encoder = Encoder::new(Vec::new(), registry, emitter);
    encoder.run()?;
    String::from_utf8(encoder.into_inner())
        .map_err(|e| EmitError::render(format!("generated code is not UTF-8: {e}")).into())
}

/// Generates code for a single schema document.
///
/// # Arguments
/// * `json` - Schema document content
/// * `lang` - Target language
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_json(json: &str, lang: Lang) -> Result<String, CodegenError> {
    let root = jvgen_schema::parse_root(json, "root")?;
    let registry = Registry::new(vec![root])?;
    generate(&registry, lang.emitter(naming::DEFAULT_ROOT_NAME, false))
}

/// Generates code for a set of schema files, in the order given.
///
/// Type names start with `root_name`, or with the file stem of each schema
/// when `names_from_ids` is set. Several composite roots sharing one
/// `root_name` collide and fail.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_files<P: AsRef<Path>>(
    paths: &[P],
    lang: Lang,
    root_name: &str,
    names_from_ids: bool,
) -> Result<String, CodegenError> {
    let registry = Registry::from_files(paths)?;
    generate(&registry, lang.emitter(root_name, names_from_ids))
}
