//! Declarative migration plans.
//!
//! A plan is a TOML document listing migrations in the order a host should
//! apply them:
//!
//! ```toml
//! [[migration]]
//! name = "create_user_and_admin"
//!
//! [[migration.step]]
//! op = "create_role"
//! role = "user"
//!
//! [[migration.step]]
//! op = "grant_rights"
//! role = "user"
//! rights = ["use"]
//! ```
//!
//! A plan records no history. Which of its migrations have already run is
//! a property of the schema, not of the plan.

use std::collections::HashSet;
use std::path::Path;

use perm_core::error::{MigrationError, PlanError};
use perm_core::name::{MigrationName, RightName, RoleName};
use perm_core::schema::Schema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alteration::{Alteration, AlterationArgs, AlterationKind};
use crate::migration::{Migration, MigrationBuilder};

/// One declared step of a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepDefinition {
    /// Create a role
    CreateRole {
        /// Role to create
        role: RoleName,
    },

    /// Delete a role
    DeleteRole {
        /// Role to delete
        role: RoleName,
    },

    /// Grant rights to a role
    GrantRights {
        /// Role receiving the rights
        role: RoleName,

        /// Rights to grant
        rights: Vec<RightName>,
    },

    /// Revoke rights from a role
    RevokeRights {
        /// Role losing the rights
        role: RoleName,

        /// Rights to revoke
        rights: Vec<RightName>,
    },
}

impl StepDefinition {
    /// The role this step targets.
    pub fn role_name(&self) -> &RoleName {
        match self {
            Self::CreateRole { role }
            | Self::DeleteRole { role }
            | Self::GrantRights { role, .. }
            | Self::RevokeRights { role, .. } => role,
        }
    }

    fn declare(&self, builder: &mut MigrationBuilder) {
        match self {
            Self::CreateRole { role } => {
                builder.create_role(role);
            }
            Self::DeleteRole { role } => {
                builder.delete_role(role);
            }
            Self::GrantRights { role, rights } => {
                builder.grant_rights(role, rights.iter().cloned());
            }
            Self::RevokeRights { role, rights } => {
                builder.revoke_rights(role, rights.iter().cloned());
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.role_name().is_blank() {
            return Err("role name is empty".to_string());
        }

        // An empty rights list is a no-op, same as in a built migration
        if let Self::GrantRights { rights, .. } | Self::RevokeRights { rights, .. } = self {
            if rights.iter().any(|right| right.is_blank()) {
                return Err(format!("empty right name for role {}", self.role_name()));
            }
        }

        Ok(())
    }
}

impl From<&Alteration> for StepDefinition {
    fn from(alteration: &Alteration) -> Self {
        let role = alteration.role_name().clone();
        let rights = match alteration.args() {
            AlterationArgs::Role(_) => Vec::new(),
            AlterationArgs::Grant(_, rights) => rights.clone(),
        };

        match alteration.kind() {
            AlterationKind::RoleCreation => Self::CreateRole { role },
            AlterationKind::RoleDeletion => Self::DeleteRole { role },
            AlterationKind::GrantCreation => Self::GrantRights { role, rights },
            AlterationKind::GrantDeletion => Self::RevokeRights { role, rights },
        }
    }
}

/// A named migration as declared in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationDefinition {
    /// Migration name
    pub name: MigrationName,

    /// Steps, in declaration order
    #[serde(default, rename = "step")]
    pub steps: Vec<StepDefinition>,
}

impl MigrationDefinition {
    /// Build the migration this definition declares.
    pub fn to_migration(&self) -> Migration {
        Migration::define(self.name.clone(), |builder| {
            for step in &self.steps {
                step.declare(builder);
            }
        })
    }
}

impl From<&Migration> for MigrationDefinition {
    fn from(migration: &Migration) -> Self {
        Self {
            name: migration.name().clone(),
            steps: migration.alterations().iter().map(Into::into).collect(),
        }
    }
}

/// An ordered list of migrations loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationPlan {
    #[serde(default, rename = "migration")]
    migrations: Vec<MigrationDefinition>,
}

impl MigrationPlan {
    /// Create a plan from migration definitions, validating them.
    pub fn new(migrations: Vec<MigrationDefinition>) -> Result<Self, PlanError> {
        let plan = Self { migrations };
        plan.validate()?;
        Ok(plan)
    }

    /// Create a plan from built migrations.
    ///
    /// Any migration the builder produces exports, empty grants included.
    /// Blank names are rejected.
    pub fn from_migrations<'a>(
        migrations: impl IntoIterator<Item = &'a Migration>,
    ) -> Result<Self, PlanError> {
        Self::new(migrations.into_iter().map(Into::into).collect())
    }

    /// Parse and validate a plan from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, PlanError> {
        let plan: Self =
            toml::from_str(source).map_err(|e| PlanError::ParseFailed(e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    /// Load a plan from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> perm_core::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&source)?)
    }

    /// Serialize the plan as TOML.
    pub fn to_toml_string(&self) -> Result<String, PlanError> {
        toml::to_string(self).map_err(|e| PlanError::ParseFailed(e.to_string()))
    }

    /// The migration definitions, in plan order.
    pub fn definitions(&self) -> &[MigrationDefinition] {
        &self.migrations
    }

    /// Build every migration, in plan order.
    pub fn migrations(&self) -> Vec<Migration> {
        self.migrations
            .iter()
            .map(MigrationDefinition::to_migration)
            .collect()
    }

    /// Build a single migration by name.
    pub fn migration(&self, name: &str) -> Result<Migration, MigrationError> {
        self.migrations
            .iter()
            .find(|definition| definition.name.as_str() == name)
            .map(MigrationDefinition::to_migration)
            .ok_or_else(|| MigrationError::NotFound(MigrationName::from(name)))
    }

    /// Number of migrations in the plan.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Check whether the plan declares no migrations.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Apply every migration, in plan order.
    ///
    /// Stops at the first failing migration; earlier migrations stay applied.
    pub fn apply<S>(&self, schema: &mut S) -> Result<(), MigrationError>
    where
        S: Schema + ?Sized,
    {
        info!("Applying plan of {} migrations", self.migrations.len());

        for migration in self.migrations() {
            migration.apply(schema)?;
        }

        Ok(())
    }

    /// Reverse every migration, last migration first.
    pub fn reverse<S>(&self, schema: &mut S) -> Result<(), MigrationError>
    where
        S: Schema + ?Sized,
    {
        info!("Reversing plan of {} migrations", self.migrations.len());

        for migration in self.migrations().iter().rev() {
            migration.reverse(schema)?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), PlanError> {
        let mut seen = HashSet::new();

        for (index, definition) in self.migrations.iter().enumerate() {
            if definition.name.is_blank() {
                return Err(PlanError::EmptyMigrationName(index));
            }

            if !seen.insert(definition.name.as_str()) {
                return Err(PlanError::DuplicateMigration(definition.name.clone()));
            }

            for (position, step) in definition.steps.iter().enumerate() {
                step.validate().map_err(|reason| PlanError::InvalidStep {
                    migration: definition.name.clone(),
                    position,
                    reason,
                })?;
            }
        }

        Ok(())
    }
}
