//! Error types for code generation.

use jvgen_schema::SchemaKind;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] jvgen_schema::ParseError),

    /// Registry construction error.
    #[error("schema error: {0}")]
    Schema(#[from] jvgen_schema::SchemaError),

    /// A discriminator mapping entry is not a `properties` schema.
    #[error(
        "schemas within `mapping` must use only properties and optionalProperties: \
         entry '{key}' is of kind {kind}"
    )]
    InvalidMapping {
        /// Offending mapping key.
        key: String,
        /// Kind of the offending schema.
        kind: SchemaKind,
    },

    /// Failure reported by the emitter.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Error type returned by [`Emitter`](crate::Emitter) implementations.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Writing to the output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The emitter could not render a type.
    #[error("render error: {message}")]
    Render {
        /// Error message.
        message: String,
    },
}

impl EmitError {
    /// Creates a render error with the given message.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mapping_message() {
        let err = CodegenError::InvalidMapping {
            key: "circle".to_string(),
            kind: SchemaKind::Elements,
        };
        let message = err.to_string();
        assert!(message.contains("'circle'"));
        assert!(message.contains("elements"));
    }

    #[test]
    fn test_emit_error_is_transparent() {
        let err = CodegenError::from(EmitError::render("bad token"));
        assert_eq!(err.to_string(), "render error: bad token");
    }
}
