//! Alterations.
//!
//! An alteration is one atomic, invertible change to a schema. There are
//! four kinds, paired two by two: each kind names the single schema
//! operation it performs and the kind that undoes it. Inversion is purely
//! structural. The inverse of granting `[use]` to `admin` is revoking `[use]`
//! from `admin`, whatever the role looks like when the inverse runs.
//!
//! The same holds for roles. Under the default schema config, creating a
//! role that already exists replaces it with an empty role, and the inverse
//! deletes it. The rights the role held before are lost either way. A
//! strict schema config rejects the creation instead.

use std::fmt;

use perm_core::error::SchemaError;
use perm_core::name::{MigrationName, RightName, RoleName};
use perm_core::schema::Schema;
use serde::{Deserialize, Serialize};

/// The kind of an alteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlterationKind {
    /// Create a role.
    RoleCreation,

    /// Delete a role along with its rights.
    RoleDeletion,

    /// Grant rights to a role.
    GrantCreation,

    /// Revoke rights from a role.
    GrantDeletion,
}

impl AlterationKind {
    /// The kind that structurally undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::RoleCreation => Self::RoleDeletion,
            Self::RoleDeletion => Self::RoleCreation,
            Self::GrantCreation => Self::GrantDeletion,
            Self::GrantDeletion => Self::GrantCreation,
        }
    }

    /// Name of the schema operation this kind invokes.
    pub fn operation(self) -> &'static str {
        match self {
            Self::RoleCreation => "create_role",
            Self::RoleDeletion => "delete_role",
            Self::GrantCreation => "grant_rights",
            Self::GrantDeletion => "revoke_rights",
        }
    }
}

impl fmt::Display for AlterationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RoleCreation => "RoleCreation",
            Self::RoleDeletion => "RoleDeletion",
            Self::GrantCreation => "GrantCreation",
            Self::GrantDeletion => "GrantDeletion",
        };
        f.write_str(name)
    }
}

/// Arguments captured by an alteration when it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterationArgs {
    /// A role name, for role creation and deletion.
    Role(RoleName),

    /// A role name and the rights to grant or revoke.
    Grant(RoleName, Vec<RightName>),
}

impl AlterationArgs {
    /// The role the alteration targets.
    pub fn role_name(&self) -> &RoleName {
        match self {
            Self::Role(role) | Self::Grant(role, _) => role,
        }
    }

    /// The rights the alteration grants or revokes; empty for role alterations.
    pub fn right_names(&self) -> &[RightName] {
        match self {
            Self::Role(_) => &[],
            Self::Grant(_, rights) => rights.as_slice(),
        }
    }
}

/// An atomic, invertible change to a schema.
///
/// An alteration belongs to exactly one migration. The back-reference is the
/// migration's name and is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alteration {
    kind: AlterationKind,
    migration: MigrationName,
    args: AlterationArgs,
}

impl Alteration {
    /// An alteration that creates a role.
    pub fn role_creation(migration: MigrationName, role: RoleName) -> Self {
        Self {
            kind: AlterationKind::RoleCreation,
            migration,
            args: AlterationArgs::Role(role),
        }
    }

    /// An alteration that deletes a role.
    pub fn role_deletion(migration: MigrationName, role: RoleName) -> Self {
        Self {
            kind: AlterationKind::RoleDeletion,
            migration,
            args: AlterationArgs::Role(role),
        }
    }

    /// An alteration that grants rights to a role.
    pub fn grant_creation(
        migration: MigrationName,
        role: RoleName,
        rights: Vec<RightName>,
    ) -> Self {
        Self {
            kind: AlterationKind::GrantCreation,
            migration,
            args: AlterationArgs::Grant(role, rights),
        }
    }

    /// An alteration that revokes rights from a role.
    pub fn grant_deletion(
        migration: MigrationName,
        role: RoleName,
        rights: Vec<RightName>,
    ) -> Self {
        Self {
            kind: AlterationKind::GrantDeletion,
            migration,
            args: AlterationArgs::Grant(role, rights),
        }
    }

    /// The kind of this alteration.
    pub fn kind(&self) -> AlterationKind {
        self.kind
    }

    /// Name of the migration this alteration belongs to.
    pub fn migration(&self) -> &MigrationName {
        &self.migration
    }

    /// The captured arguments.
    pub fn args(&self) -> &AlterationArgs {
        &self.args
    }

    /// The role this alteration targets.
    pub fn role_name(&self) -> &RoleName {
        self.args.role_name()
    }

    /// The rights this alteration grants or revokes.
    pub fn right_names(&self) -> &[RightName] {
        self.args.right_names()
    }

    /// Apply this alteration to a schema.
    ///
    /// Invokes the single schema operation paired with this alteration's
    /// kind. The alteration does no validation of its own; whatever the
    /// schema raises is returned unchanged.
    ///
    /// # Arguments
    ///
    /// * `schema` - The schema to mutate.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the schema accepted the change.
    /// * `Err(SchemaError)` - The schema's error.
    pub fn apply<S>(&self, schema: &mut S) -> Result<(), SchemaError>
    where
        S: Schema + ?Sized,
    {
        let role = self.args.role_name();

        match self.kind {
            AlterationKind::RoleCreation => schema.create_role(role.clone()).map(|_| ()),
            AlterationKind::RoleDeletion => schema.delete_role(role).map(|_| ()),
            AlterationKind::GrantCreation => schema.grant_rights(role, self.args.right_names()),
            AlterationKind::GrantDeletion => schema.revoke_rights(role, self.args.right_names()),
        }
    }

    /// Build the alteration that structurally undoes this one.
    ///
    /// The result is a new alteration of the inverse kind with the same
    /// arguments and the same owning migration. No schema is consulted.
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            migration: self.migration.clone(),
            args: self.args.clone(),
        }
    }
}

impl fmt::Display for Alteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.args {
            AlterationArgs::Role(role) => write!(f, "{}({})", self.kind.operation(), role),
            AlterationArgs::Grant(role, rights) => {
                let rights: Vec<&str> = rights.iter().map(|r| r.as_str()).collect();
                write!(
                    f,
                    "{}({}, [{}])",
                    self.kind.operation(),
                    role,
                    rights.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perm_core::name::rights;
    use perm_core::InMemorySchema;

    fn migration() -> MigrationName {
        MigrationName::from("test")
    }

    #[test]
    fn test_inverse_table() {
        use AlterationKind::*;

        assert_eq!(RoleCreation.inverse(), RoleDeletion);
        assert_eq!(RoleDeletion.inverse(), RoleCreation);
        assert_eq!(GrantCreation.inverse(), GrantDeletion);
        assert_eq!(GrantDeletion.inverse(), GrantCreation);

        for kind in [RoleCreation, RoleDeletion, GrantCreation, GrantDeletion] {
            assert_eq!(kind.inverse().inverse(), kind);
        }
    }

    #[test]
    fn test_operations() {
        assert_eq!(AlterationKind::RoleCreation.operation(), "create_role");
        assert_eq!(AlterationKind::RoleDeletion.operation(), "delete_role");
        assert_eq!(AlterationKind::GrantCreation.operation(), "grant_rights");
        assert_eq!(AlterationKind::GrantDeletion.operation(), "revoke_rights");
    }

    #[test]
    fn test_inverse_keeps_args_and_migration() {
        let grant = Alteration::grant_creation(
            migration(),
            RoleName::from("admin"),
            rights(["use", "administrate"]),
        );
        let revoke = grant.inverse();

        assert_eq!(revoke.kind(), AlterationKind::GrantDeletion);
        assert_eq!(revoke.args(), grant.args());
        assert_eq!(revoke.migration(), grant.migration());

        // Each call builds a fresh, equivalent alteration
        assert_eq!(grant.inverse(), revoke);
        assert_eq!(revoke.inverse(), grant);
    }

    #[test]
    fn test_apply_role_creation_and_inverse() {
        let mut schema = InMemorySchema::new();
        let create = Alteration::role_creation(migration(), RoleName::from("user"));

        create.apply(&mut schema).unwrap();
        assert!(schema.contains_role("user"));

        create.inverse().apply(&mut schema).unwrap();
        assert!(!schema.contains_role("user"));
    }

    #[test]
    fn test_apply_grant_and_inverse() {
        let mut schema = InMemorySchema::new();
        Alteration::role_creation(migration(), RoleName::from("admin"))
            .apply(&mut schema)
            .unwrap();

        let grant =
            Alteration::grant_creation(migration(), RoleName::from("admin"), rights(["use"]));
        grant.apply(&mut schema).unwrap();
        assert!(schema.lookup("admin").unwrap().can_perform("use"));

        grant.inverse().apply(&mut schema).unwrap();
        assert!(!schema.lookup("admin").unwrap().can_perform("use"));
    }

    #[test]
    fn test_apply_propagates_schema_error() {
        let mut schema = InMemorySchema::new();
        let grant =
            Alteration::grant_creation(migration(), RoleName::from("ghost"), rights(["use"]));

        assert_eq!(
            grant.apply(&mut schema).unwrap_err(),
            SchemaError::UnknownRole(RoleName::from("ghost"))
        );
    }

    #[test]
    fn test_inverse_is_structural() {
        // Revoking what was granted, even if another change re-granted it since
        let mut schema = InMemorySchema::new();
        let admin = RoleName::from("admin");
        schema.create_role(admin.clone()).unwrap();
        schema.grant_rights(&admin, &rights(["use"])).unwrap();

        let grant = Alteration::grant_creation(migration(), admin.clone(), rights(["use"]));
        grant.apply(&mut schema).unwrap();
        grant.inverse().apply(&mut schema).unwrap();

        assert!(!schema.lookup("admin").unwrap().can_perform("use"));
    }

    #[test]
    fn test_display() {
        let create = Alteration::role_creation(migration(), RoleName::from("user"));
        assert_eq!(create.to_string(), "create_role(user)");

        let grant = Alteration::grant_creation(
            migration(),
            RoleName::from("admin"),
            rights(["use", "administrate"]),
        );
        assert_eq!(grant.to_string(), "grant_rights(admin, [use, administrate])");
        assert_eq!(
            grant.inverse().to_string(),
            "revoke_rights(admin, [use, administrate])"
        );
    }
}
