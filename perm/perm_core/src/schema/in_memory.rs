//! In-memory schema.
//!
//! This module provides the default schema store: an ordered map from role
//! name to role, owned by whoever created it.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::Schema;
use crate::config::{DuplicateRolePolicy, MissingRolePolicy, SchemaConfig};
use crate::error::SchemaError;
use crate::model::Role;
use crate::name::{RightName, RoleName};

/// An in-memory schema.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    /// The roles, indexed by name.
    roles: BTreeMap<RoleName, Role>,

    /// How duplicate creations and missing deletions are handled.
    config: SchemaConfig,
}

impl InMemorySchema {
    /// Create a new, empty schema with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty schema with the given configuration.
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            roles: BTreeMap::new(),
            config,
        }
    }

    /// The configuration of this schema.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Read access to the roles, indexed by name.
    pub fn roles_by_name(&self) -> &BTreeMap<RoleName, Role> {
        &self.roles
    }
}

impl Schema for InMemorySchema {
    fn create_role(&mut self, name: RoleName) -> Result<&Role, SchemaError> {
        match self.roles.entry(name) {
            Entry::Occupied(mut entry) => match self.config.duplicate_role {
                DuplicateRolePolicy::Reject => {
                    Err(SchemaError::DuplicateRole(entry.key().clone()))
                }
                DuplicateRolePolicy::Replace => {
                    warn!("Replacing existing role {}", entry.key());
                    let name = entry.key().clone();
                    entry.insert(Role::new(name));
                    let role: &Role = entry.into_mut();
                    Ok(role)
                }
            },
            Entry::Vacant(entry) => {
                debug!("Creating role {}", entry.key());
                let role = Role::new(entry.key().clone());
                let role: &Role = entry.insert(role);
                Ok(role)
            }
        }
    }

    fn delete_role(&mut self, name: &RoleName) -> Result<Option<Role>, SchemaError> {
        match self.roles.remove(name.as_str()) {
            Some(role) => {
                debug!("Deleted role {} ({} rights)", name, role.right_count());
                Ok(Some(role))
            }
            None => match self.config.missing_role_on_delete {
                MissingRolePolicy::Reject => Err(SchemaError::UnknownRole(name.clone())),
                MissingRolePolicy::Ignore => {
                    warn!("Ignoring deletion of unknown role {}", name);
                    Ok(None)
                }
            },
        }
    }

    fn grant_rights(
        &mut self,
        role_name: &RoleName,
        right_names: &[RightName],
    ) -> Result<(), SchemaError> {
        // Resolve the role first; a missing role is always an error
        let role = self
            .roles
            .get_mut(role_name.as_str())
            .ok_or_else(|| SchemaError::UnknownRole(role_name.clone()))?;

        role.grant_rights(right_names);
        debug!("Granted {} rights to role {}", right_names.len(), role_name);

        Ok(())
    }

    fn revoke_rights(
        &mut self,
        role_name: &RoleName,
        right_names: &[RightName],
    ) -> Result<(), SchemaError> {
        let role = self
            .roles
            .get_mut(role_name.as_str())
            .ok_or_else(|| SchemaError::UnknownRole(role_name.clone()))?;

        role.revoke_rights(right_names);
        debug!("Revoked {} rights from role {}", right_names.len(), role_name);

        Ok(())
    }

    fn roles(&self) -> Box<dyn Iterator<Item = &Role> + '_> {
        Box::new(self.roles.values())
    }

    fn lookup(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    fn role_count(&self) -> usize {
        self.roles.len()
    }
}
