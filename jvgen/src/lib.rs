//! # jvgen
//!
//! Generate TypeScript and Rust types from JSON Type Definition schemas.
//!
//! jvgen walks each schema tree depth first and hands every composite node
//! to a language emitter, so the types a node depends on are always
//! declared before the node itself.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jvgen::prelude::*;
//!
//! let registry = Registry::from_files(&["user.json"])?;
//! let code = generate(&registry, TypeScriptEmitter::new())?;
//! print!("{code}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema node model, document loading and the registry
//! - [`codegen`] - Tree walker, emitter contract and bundled emitters
//! - [`cli`] - The `jvgen` command line

pub mod cli;
pub mod prelude;

/// Schema node model and loading.
pub mod schema {
    pub use jvgen_schema::*;
}

/// Code generation from schemas.
pub mod codegen {
    pub use jvgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use jvgen_codegen::{CodegenError, Emitter, Encoder, Lang, generate};
pub use jvgen_schema::{Registry, RootSchema, Schema};
