//! Schema configuration.
//!
//! Controls how a schema store resolves the two cases the store contract
//! leaves open: creating a role that already exists and deleting a role that
//! does not.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do when a role is created under a name that is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRolePolicy {
    /// Replace the existing role with a fresh role holding no rights.
    #[default]
    Replace,

    /// Fail with `SchemaError::DuplicateRole`.
    Reject,
}

/// What to do when a role that does not exist is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRolePolicy {
    /// Treat the deletion as a no-op.
    #[default]
    Ignore,

    /// Fail with `SchemaError::UnknownRole`.
    Reject,
}

/// Configuration for a schema store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Behaviour when creating a role that already exists
    #[serde(default)]
    pub duplicate_role: DuplicateRolePolicy,

    /// Behaviour when deleting a role that does not exist
    #[serde(default)]
    pub missing_role_on_delete: MissingRolePolicy,
}

impl SchemaConfig {
    /// A configuration that rejects both duplicate creations and missing deletions.
    pub fn strict() -> Self {
        Self {
            duplicate_role: DuplicateRolePolicy::Reject,
            missing_role_on_delete: MissingRolePolicy::Reject,
        }
    }

    /// Parse a configuration from a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        Self::from_toml_str(&source)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}
