//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jvgen::prelude::*;
//! ```

// Schema types
pub use jvgen_schema::{
    Discriminator, ParseError, PrimitiveType, Properties, Registry, RootSchema, Schema,
    SchemaError, SchemaId, SchemaKind,
};

// Codegen types
pub use jvgen_codegen::{
    CodegenError, EmitError, Emitter, Encoder, Lang, NamePath, RustEmitter, RustOptions,
    Segment, TypeScriptEmitter, TypeScriptOptions, generate,
};
