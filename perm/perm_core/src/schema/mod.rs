//! Schema storage.
//!
//! A schema is the registry of roles by name, and transitively of every
//! right in the system. It is the only mutable state migrations touch, and
//! it is only ever mutated through the operations of the `Schema` trait.

mod in_memory;
mod shared;
mod snapshot;

pub use in_memory::InMemorySchema;
pub use shared::SharedSchema;
pub use snapshot::SchemaSnapshot;

use crate::error::SchemaError;
use crate::model::Role;
use crate::name::{RightName, RoleName};

/// Trait for schema storage.
///
/// A schema owns every role. Every right is reachable from exactly one role,
/// and deleting a role removes its rights with it.
pub trait Schema {
    /// Create a role holding no rights.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the role.
    ///
    /// # Returns
    ///
    /// * `Ok(&Role)` - The newly created role.
    /// * `Err(SchemaError::DuplicateRole)` - If the store rejects duplicates
    ///   and the name is taken.
    fn create_role(&mut self, name: RoleName) -> Result<&Role, SchemaError>;

    /// Delete a role and every right it holds.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the role.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Role))` - The removed role.
    /// * `Ok(None)` - If no such role existed and the store ignores that.
    /// * `Err(SchemaError::UnknownRole)` - If no such role existed and the
    ///   store rejects that.
    fn delete_role(&mut self, name: &RoleName) -> Result<Option<Role>, SchemaError>;

    /// Grant rights to an existing role.
    ///
    /// # Arguments
    ///
    /// * `role_name` - The name of the role.
    /// * `right_names` - The rights to grant.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the rights were granted.
    /// * `Err(SchemaError::UnknownRole)` - If the role does not exist.
    fn grant_rights(
        &mut self,
        role_name: &RoleName,
        right_names: &[RightName],
    ) -> Result<(), SchemaError>;

    /// Revoke rights from an existing role.
    ///
    /// # Arguments
    ///
    /// * `role_name` - The name of the role.
    /// * `right_names` - The rights to revoke.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the rights were revoked (or were not held).
    /// * `Err(SchemaError::UnknownRole)` - If the role does not exist.
    fn revoke_rights(
        &mut self,
        role_name: &RoleName,
        right_names: &[RightName],
    ) -> Result<(), SchemaError>;

    /// All roles, in name order.
    fn roles(&self) -> Box<dyn Iterator<Item = &Role> + '_>;

    /// Look up a role by name.
    fn lookup(&self, name: &str) -> Option<&Role>;

    /// Check whether a role with the given name exists.
    fn contains_role(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of roles in the schema.
    fn role_count(&self) -> usize {
        self.roles().count()
    }

    /// Capture the current roles and rights.
    fn snapshot(&self) -> SchemaSnapshot {
        SchemaSnapshot::from_roles(self.roles())
    }
}
