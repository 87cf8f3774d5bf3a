//! Command implementations for the Perm CLI.

pub mod inspect;
pub mod migrate;

use std::path::Path;

use anyhow::{Context, Result};
use perm_core::{InMemorySchema, SchemaConfig, SchemaSnapshot};

/// Load the schema configuration, falling back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SchemaConfig> {
    match path {
        Some(path) => SchemaConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(SchemaConfig::default()),
    }
}

/// Load a schema snapshot file into an in-memory schema.
///
/// A missing file is an empty schema.
pub fn load_schema(path: &Path, config: SchemaConfig) -> Result<InMemorySchema> {
    let snapshot = SchemaSnapshot::load(path)
        .with_context(|| format!("reading schema from {}", path.display()))?;

    snapshot
        .restore(config)
        .with_context(|| format!("restoring schema from {}", path.display()))
}
