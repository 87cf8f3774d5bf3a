//! # Perm Migration
//!
//! `perm_migration` captures changes to a Perm policy schema as first-class,
//! replayable and invertible units.
//!
//! Key concepts:
//!
//! 1. **Alteration**: One atomic change (create or delete a role, grant or
//!    revoke rights). Every kind is statically paired with the kind that
//!    undoes it.
//!
//! 2. **Migration**: A named, ordered list of alterations. Applying runs
//!    them forward; reversing runs the inverse of each, last one first.
//!
//! 3. **Migration Plan**: An ordered list of migrations declared in TOML,
//!    for hosts that keep their migrations as configuration.
//!
//! ## Usage Example
//!
//! ```
//! use perm_core::{InMemorySchema, Role};
//! use perm_migration::Migration;
//!
//! let roles = Migration::define("create_user_and_admin", |m| {
//!     m.create_role("user");
//!     m.create_role("admin");
//! });
//! let rights = Migration::define("grant_user_and_admin_rights", |m| {
//!     m.role("user").can(["use"]);
//!     m.role("admin").can(["use", "administrate"]);
//! });
//!
//! let mut schema = InMemorySchema::new();
//! roles.apply(&mut schema).unwrap();
//! rights.apply(&mut schema).unwrap();
//! assert!(!Role::by_name(&schema, "user").unwrap().can_perform("administrate"));
//!
//! rights.reverse(&mut schema).unwrap();
//! roles.reverse(&mut schema).unwrap();
//! assert!(Role::by_name(&schema, "admin").is_none());
//! ```

pub mod alteration;
pub mod migration;
pub mod plan;

// Re-export key types for convenience
pub use alteration::{Alteration, AlterationArgs, AlterationKind};
pub use migration::{Migration, MigrationBuilder, RoleGrants};
pub use plan::{MigrationDefinition, MigrationPlan, StepDefinition};
