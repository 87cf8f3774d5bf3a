//! Migrations.
//!
//! A migration is a named, ordered list of alterations. It is a stateless
//! script: it does not remember whether it has been applied. Applying walks
//! the alterations in declaration order; reversing walks them backwards and
//! runs the inverse of each one.

mod builder;

pub use builder::{MigrationBuilder, RoleGrants};

use perm_core::error::{MigrationError, SchemaError};
use perm_core::name::MigrationName;
use perm_core::schema::{Schema, SharedSchema};
use tracing::{debug, info};

use crate::alteration::Alteration;

/// An ordered, named sequence of alterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Name of the migration.
    name: MigrationName,

    /// Alterations in declaration order.
    alterations: Vec<Alteration>,
}

impl Migration {
    /// Start building a migration.
    ///
    /// # Examples
    ///
    /// ```
    /// use perm_migration::Migration;
    ///
    /// let mut builder = Migration::builder("create_user_and_admin");
    /// builder.create_role("user");
    /// builder.create_role("admin");
    /// let migration = builder.build();
    ///
    /// assert_eq!(migration.len(), 2);
    /// ```
    pub fn builder(name: impl Into<MigrationName>) -> MigrationBuilder {
        MigrationBuilder::new(name)
    }

    /// Define a migration by running a builder closure once.
    ///
    /// # Examples
    ///
    /// ```
    /// use perm_core::{InMemorySchema, Role};
    /// use perm_migration::Migration;
    ///
    /// let migration = Migration::define("grant_rights", |m| {
    ///     m.create_role("admin");
    ///     m.role("admin").can(["use", "administrate"]);
    /// });
    ///
    /// let mut schema = InMemorySchema::new();
    /// migration.apply(&mut schema).unwrap();
    /// assert!(Role::by_name(&schema, "admin").unwrap().can_perform("use"));
    /// ```
    pub fn define(
        name: impl Into<MigrationName>,
        body: impl FnOnce(&mut MigrationBuilder),
    ) -> Self {
        let mut builder = MigrationBuilder::new(name);
        body(&mut builder);
        builder.build()
    }

    pub(crate) fn from_parts(name: MigrationName, alterations: Vec<Alteration>) -> Self {
        Self { name, alterations }
    }

    /// The name of the migration.
    pub fn name(&self) -> &MigrationName {
        &self.name
    }

    /// The alterations, in declaration order.
    pub fn alterations(&self) -> &[Alteration] {
        &self.alterations
    }

    /// Number of alterations.
    pub fn len(&self) -> usize {
        self.alterations.len()
    }

    /// Check whether the migration has no alterations.
    pub fn is_empty(&self) -> bool {
        self.alterations.is_empty()
    }

    /// The alterations `reverse` runs, in the order it runs them.
    pub fn inverse_alterations(&self) -> impl Iterator<Item = Alteration> + '_ {
        self.alterations.iter().rev().map(Alteration::inverse)
    }

    /// Apply every alteration, in declaration order.
    ///
    /// Stops at the first failing alteration. Alterations already applied
    /// stay applied; nothing is rolled back.
    ///
    /// # Arguments
    ///
    /// * `schema` - The schema to mutate.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every alteration was applied.
    /// * `Err(MigrationError::AlterationFailed)` - The first failure, with
    ///   the position of the failing alteration.
    pub fn apply<S>(&self, schema: &mut S) -> Result<(), MigrationError>
    where
        S: Schema + ?Sized,
    {
        info!(
            "Applying migration {} ({} alterations)",
            self.name,
            self.alterations.len()
        );

        for (position, alteration) in self.alterations.iter().enumerate() {
            debug!("Applying {} from migration {}", alteration, self.name);
            alteration
                .apply(schema)
                .map_err(|source| self.failure(position, alteration, source))?;
        }

        Ok(())
    }

    /// Undo the migration.
    ///
    /// Walks the alterations from last to first and, for each one, builds
    /// its inverse and applies it immediately. Stops at the first failure
    /// without restoring anything.
    ///
    /// Reversing does not restore the schema the migration found. A role
    /// the migration re-created over an existing one is deleted, not given
    /// back its earlier rights.
    ///
    /// # Arguments
    ///
    /// * `schema` - The schema to mutate.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every inverse was applied.
    /// * `Err(MigrationError::AlterationFailed)` - The first failure; the
    ///   position is that of the original alteration.
    pub fn reverse<S>(&self, schema: &mut S) -> Result<(), MigrationError>
    where
        S: Schema + ?Sized,
    {
        info!(
            "Reversing migration {} ({} alterations)",
            self.name,
            self.alterations.len()
        );

        for (position, alteration) in self.alterations.iter().enumerate().rev() {
            let inverse = alteration.inverse();
            debug!("Applying {} to reverse migration {}", inverse, self.name);
            inverse
                .apply(schema)
                .map_err(|source| self.failure(position, &inverse, source))?;
        }

        Ok(())
    }

    /// Apply the migration while holding the shared schema's lock throughout.
    pub fn apply_shared<S>(&self, schema: &SharedSchema<S>) -> Result<(), MigrationError>
    where
        S: Schema,
    {
        schema.with(|schema| self.apply(schema))
    }

    /// Reverse the migration while holding the shared schema's lock throughout.
    pub fn reverse_shared<S>(&self, schema: &SharedSchema<S>) -> Result<(), MigrationError>
    where
        S: Schema,
    {
        schema.with(|schema| self.reverse(schema))
    }

    fn failure(
        &self,
        position: usize,
        alteration: &Alteration,
        source: SchemaError,
    ) -> MigrationError {
        MigrationError::AlterationFailed {
            migration: self.name.clone(),
            position,
            operation: alteration.kind().operation(),
            source,
        }
    }
}
