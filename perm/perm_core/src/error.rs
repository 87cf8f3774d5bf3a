//! Error types for the Perm policy store.
//!
//! Errors are grouped by subsystem: the schema store, migrations, migration
//! plans and configuration. The root error type, `Error`, wraps each of them
//! so callers that do not care about the subsystem can handle failures
//! uniformly.

use crate::name::{MigrationName, RoleName};
use thiserror::Error;

/// Root error type for the Perm system.
#[derive(Debug, Error)]
pub enum Error {
    /// Schema store errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Migration application errors
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    /// Migration plan errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by a schema store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No role with the given name exists
    #[error("Unknown role: {0}")]
    UnknownRole(RoleName),

    /// A role with the given name already exists
    #[error("Duplicate role: {0}")]
    DuplicateRole(RoleName),
}

/// Errors raised while applying or reversing a migration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// An alteration failed; alterations after it were not run
    #[error("Migration {migration} failed at alteration {position} ({operation}): {source}")]
    AlterationFailed {
        /// Migration that owns the failing alteration
        migration: MigrationName,

        /// Zero-based position of the alteration in declaration order
        position: usize,

        /// Schema operation the alteration invoked
        operation: &'static str,

        /// Error raised by the schema
        #[source]
        source: SchemaError,
    },

    /// No migration with the given name is known
    #[error("Migration not found: {0}")]
    NotFound(MigrationName),
}

impl MigrationError {
    /// The schema error behind an alteration failure, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::AlterationFailed { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

/// Errors raised while loading a declarative migration plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan document could not be parsed
    #[error("Failed to parse plan: {0}")]
    ParseFailed(String),

    /// Two migrations in the plan share a name
    #[error("Duplicate migration name: {0}")]
    DuplicateMigration(MigrationName),

    /// A step is malformed
    #[error("Invalid step {position} in migration {migration}: {reason}")]
    InvalidStep {
        /// Migration containing the step
        migration: MigrationName,

        /// Zero-based position of the step
        position: usize,

        /// What is wrong with it
        reason: String,
    },

    /// A migration has a blank name
    #[error("Migration at index {0} has an empty name")]
    EmptyMigrationName(usize),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be read
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    /// The configuration could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type used throughout the Perm system.
pub type Result<T> = std::result::Result<T, Error>;
