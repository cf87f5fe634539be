//! Ordered collection of root schemas.

use crate::document::load_root;
use crate::error::SchemaError;
use crate::types::{Schema, SchemaId};
use std::collections::HashSet;
use std::path::Path;

/// A top-level schema together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSchema {
    /// Unique identifier within a registry.
    pub id: SchemaId,
    /// The schema tree.
    pub schema: Schema,
}

impl RootSchema {
    /// Creates a root schema.
    #[must_use]
    pub fn new(id: impl Into<SchemaId>, schema: Schema) -> Self {
        Self {
            id: id.into(),
            schema,
        }
    }
}

/// Root schemas in the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: Vec<RootSchema>,
}

impl Registry {
    /// Creates a registry from root schemas.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateId` if two roots share an identifier.
    pub fn new(schemas: Vec<RootSchema>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for root in &schemas {
            if !seen.insert(&root.id) {
                return Err(SchemaError::DuplicateId {
                    id: root.id.to_string(),
                });
            }
        }
        Ok(Self { schemas })
    }

    /// Loads every file into a registry, preserving argument order.
    ///
    /// # Errors
    /// Returns `SchemaError` if any file fails to load or ids collide.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SchemaError> {
        let schemas = paths
            .iter()
            .map(|path| load_root(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(schemas)
    }

    /// Returns the root schemas in registry order.
    #[must_use]
    pub fn schemas(&self) -> &[RootSchema] {
        &self.schemas
    }

    /// Looks up a root schema by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RootSchema> {
        self.schemas.iter().find(|root| root.id.as_str() == id)
    }

    /// Returns the number of root schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the registry holds no schemas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
