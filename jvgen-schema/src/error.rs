//! Error types for schema loading and registry construction.

use thiserror::Error;

/// Error type for schema document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown primitive type keyword.
    #[error("unknown type '{type_name}' at {location}")]
    UnknownType {
        /// Type keyword found in the document.
        type_name: String,
        /// Location of the node within the document.
        location: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure at {location}: {message}")]
    InvalidStructure {
        /// Location of the node within the document.
        location: String,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for registry construction.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Two root schemas share an identifier.
    #[error("duplicate schema id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            location: location.into(),
        }
    }
}
