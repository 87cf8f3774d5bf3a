//! Roles.
//!
//! A role is a named bag of rights. Rights are keyed by name, so granting a
//! right the role already holds and revoking one it does not hold are both
//! silent no-ops.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Right;
use crate::name::{RightName, RoleName};
use crate::schema::Schema;

/// A named collection of granted rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The name of the role.
    name: RoleName,

    /// The rights held by the role, indexed by name.
    rights: BTreeMap<RightName, Right>,
}

impl Role {
    /// Create a new role holding no rights.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the role.
    ///
    /// # Returns
    ///
    /// A new role with an empty set of rights.
    pub fn new(name: impl Into<RoleName>) -> Self {
        Self {
            name: name.into(),
            rights: BTreeMap::new(),
        }
    }

    /// Look up a role by name in a schema.
    ///
    /// This never constructs a role: a name that was never created, or has
    /// since been deleted, yields `None`.
    ///
    /// # Arguments
    ///
    /// * `schema` - The schema to query.
    /// * `name` - The name of the role.
    ///
    /// # Returns
    ///
    /// * `Some(&Role)` - If the schema holds a role with that name.
    /// * `None` - Otherwise.
    pub fn by_name<'a, S>(schema: &'a S, name: &str) -> Option<&'a Role>
    where
        S: Schema + ?Sized,
    {
        schema.lookup(name)
    }

    /// The name of this role.
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Check whether the role currently holds a right.
    ///
    /// # Arguments
    ///
    /// * `right_name` - The name of the right.
    ///
    /// # Returns
    ///
    /// `true` if a right with that name is held, `false` otherwise.
    pub fn can_perform(&self, right_name: &str) -> bool {
        self.rights.contains_key(right_name)
    }

    /// Grant rights to this role.
    ///
    /// Each name creates (or replaces) the right with that name. Granting an
    /// already held right has no observable effect.
    ///
    /// # Arguments
    ///
    /// * `right_names` - The names of the rights to grant.
    pub fn grant_rights(&mut self, right_names: &[RightName]) {
        for right_name in right_names {
            self.rights
                .insert(right_name.clone(), Right::new(right_name.clone()));
        }
    }

    /// Revoke rights from this role.
    ///
    /// Revoking a right that is not held is a silent no-op.
    ///
    /// # Arguments
    ///
    /// * `right_names` - The names of the rights to revoke.
    pub fn revoke_rights(&mut self, right_names: &[RightName]) {
        for right_name in right_names {
            self.rights.remove(right_name.as_str());
        }
    }

    /// The rights held by this role, in name order.
    pub fn rights(&self) -> impl Iterator<Item = &Right> {
        self.rights.values()
    }

    /// The names of the rights held by this role, in name order.
    pub fn right_names(&self) -> impl Iterator<Item = &RightName> {
        self.rights.keys()
    }

    /// Number of rights held.
    pub fn right_count(&self) -> usize {
        self.rights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::rights;

    #[test]
    fn test_new_role_has_no_rights() {
        let role = Role::new("user");
        assert_eq!(role.name().as_str(), "user");
        assert_eq!(role.right_count(), 0);
        assert!(!role.can_perform("use"));
    }

    #[test]
    fn test_grant_rights() {
        let mut role = Role::new("admin");
        role.grant_rights(&rights(["use", "administrate"]));

        assert!(role.can_perform("use"));
        assert!(role.can_perform("administrate"));
        assert!(!role.can_perform("delete"));
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut role = Role::new("user");
        role.grant_rights(&rights(["use"]));
        role.grant_rights(&rights(["use", "use"]));

        assert_eq!(role.right_count(), 1);
    }

    #[test]
    fn test_revoke_rights() {
        let mut role = Role::new("admin");
        role.grant_rights(&rights(["use", "administrate"]));
        role.revoke_rights(&rights(["administrate"]));

        assert!(role.can_perform("use"));
        assert!(!role.can_perform("administrate"));
    }

    #[test]
    fn test_revoke_absent_right_is_noop() {
        let mut role = Role::new("user");
        role.grant_rights(&rights(["use"]));
        role.revoke_rights(&rights(["administrate"]));

        assert_eq!(role.right_count(), 1);
        assert!(role.can_perform("use"));
    }

    #[test]
    fn test_right_names_are_ordered() {
        let mut role = Role::new("admin");
        role.grant_rights(&rights(["use", "administrate"]));

        let names: Vec<&str> = role.right_names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["administrate", "use"]);
    }

    #[test]
    fn test_rights_follow_grants_and_revokes() {
        let mut role = Role::new("admin");
        role.grant_rights(&rights(["use", "administrate", "report"]));
        role.revoke_rights(&rights(["report"]));

        let held: Vec<Right> = role.rights().cloned().collect();
        assert_eq!(held, vec![Right::new("administrate"), Right::new("use")]);
    }
}
