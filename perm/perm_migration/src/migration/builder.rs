//! Migration builder.
//!
//! Each builder call constructs the matching alteration and appends it to
//! the migration being built.

use perm_core::name::{MigrationName, RightName, RoleName};

use super::Migration;
use crate::alteration::Alteration;

/// Builds a migration one alteration at a time.
#[derive(Debug)]
pub struct MigrationBuilder {
    name: MigrationName,
    alterations: Vec<Alteration>,
}

impl MigrationBuilder {
    /// Create a builder for a migration with the given name.
    pub fn new(name: impl Into<MigrationName>) -> Self {
        Self {
            name: name.into(),
            alterations: Vec::new(),
        }
    }

    /// The name of the migration being built.
    pub fn name(&self) -> &MigrationName {
        &self.name
    }

    /// Number of alterations declared so far.
    pub fn len(&self) -> usize {
        self.alterations.len()
    }

    /// Check whether no alterations have been declared yet.
    pub fn is_empty(&self) -> bool {
        self.alterations.is_empty()
    }

    /// Declare the creation of a role.
    ///
    /// Returns the appended alteration.
    pub fn create_role(&mut self, role: impl Into<RoleName>) -> &Alteration {
        let alteration = Alteration::role_creation(self.name.clone(), role.into());
        self.push(alteration)
    }

    /// Declare the deletion of a role.
    ///
    /// Returns the appended alteration.
    pub fn delete_role(&mut self, role: impl Into<RoleName>) -> &Alteration {
        let alteration = Alteration::role_deletion(self.name.clone(), role.into());
        self.push(alteration)
    }

    /// Declare a grant of rights to a role.
    pub fn grant_rights<I, R>(&mut self, role: impl Into<RoleName>, rights: I) -> &mut Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RightName>,
    {
        let rights = rights.into_iter().map(Into::into).collect();
        let alteration = Alteration::grant_creation(self.name.clone(), role.into(), rights);
        self.push(alteration);
        self
    }

    /// Declare a revocation of rights from a role.
    pub fn revoke_rights<I, R>(&mut self, role: impl Into<RoleName>, rights: I) -> &mut Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RightName>,
    {
        let rights = rights.into_iter().map(Into::into).collect();
        let alteration = Alteration::grant_deletion(self.name.clone(), role.into(), rights);
        self.push(alteration);
        self
    }

    /// Address a role, so rights can be declared as `role("admin").can([...])`.
    pub fn role(&mut self, role: impl Into<RoleName>) -> RoleGrants<'_> {
        RoleGrants {
            builder: self,
            role: role.into(),
        }
    }

    /// Finish the migration.
    pub fn build(self) -> Migration {
        Migration::from_parts(self.name, self.alterations)
    }

    fn push(&mut self, alteration: Alteration) -> &Alteration {
        let position = self.alterations.len();
        self.alterations.push(alteration);
        &self.alterations[position]
    }
}

/// A role addressed within a migration builder.
///
/// `role("admin").can(["use"])` is exactly `grant_rights("admin", ["use"])`.
#[derive(Debug)]
pub struct RoleGrants<'a> {
    builder: &'a mut MigrationBuilder,
    role: RoleName,
}

impl<'a> RoleGrants<'a> {
    /// The role being addressed.
    pub fn role_name(&self) -> &RoleName {
        &self.role
    }

    /// Grant rights to the role.
    pub fn can<I, R>(self, rights: I) -> &'a mut MigrationBuilder
    where
        I: IntoIterator<Item = R>,
        R: Into<RightName>,
    {
        self.builder.grant_rights(self.role, rights)
    }

    /// Revoke rights from the role.
    pub fn cannot<I, R>(self, rights: I) -> &'a mut MigrationBuilder
    where
        I: IntoIterator<Item = R>,
        R: Into<RightName>,
    {
        self.builder.revoke_rights(self.role, rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alteration::AlterationKind;

    #[test]
    fn test_create_role_returns_alteration() {
        let mut builder = MigrationBuilder::new("roles");
        let alteration = builder.create_role("user");

        assert_eq!(alteration.kind(), AlterationKind::RoleCreation);
        assert_eq!(alteration.role_name().as_str(), "user");
        assert_eq!(alteration.migration().as_str(), "roles");
    }

    #[test]
    fn test_role_proxy_is_grant_rights() {
        let mut sugar = MigrationBuilder::new("grants");
        sugar.role("admin").can(["use", "administrate"]);

        let mut plain = MigrationBuilder::new("grants");
        plain.grant_rights("admin", ["use", "administrate"]);

        assert_eq!(sugar.build(), plain.build());
    }

    #[test]
    fn test_cannot_is_revoke_rights() {
        let mut builder = MigrationBuilder::new("revokes");
        builder.role("admin").cannot(["administrate"]);
        let migration = builder.build();

        let alteration = &migration.alterations()[0];
        assert_eq!(alteration.kind(), AlterationKind::GrantDeletion);
        assert_eq!(alteration.right_names()[0].as_str(), "administrate");
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let mut builder = MigrationBuilder::new("ordered");
        builder.create_role("user");
        builder
            .grant_rights("user", ["use"])
            .revoke_rights("user", ["use"]);
        builder.delete_role("user");

        let kinds: Vec<AlterationKind> = builder
            .build()
            .alterations()
            .iter()
            .map(|a| a.kind())
            .collect();

        assert_eq!(
            kinds,
            vec![
                AlterationKind::RoleCreation,
                AlterationKind::GrantCreation,
                AlterationKind::GrantDeletion,
                AlterationKind::RoleDeletion,
            ]
        );
    }

    #[test]
    fn test_chained_role_grants() {
        let mut builder = MigrationBuilder::new("chained");
        builder
            .role("user")
            .can(["use"])
            .role("admin")
            .can(["use", "administrate"]);

        assert_eq!(builder.len(), 2);
    }
}
