//! # Perm Core
//!
//! `perm_core` holds the policy store that Perm migrations operate on:
//! roles, the rights granted to them, and the schema that registers roles by
//! name.
//!
//! Key concepts:
//!
//! 1. **Right**: A named permission atom held by exactly one role.
//!
//! 2. **Role**: A named collection of rights. Granting a held right and
//!    revoking a missing one are both no-ops.
//!
//! 3. **Schema**: The registry of roles by name. It is an ordinary value,
//!    owned by the caller and passed by reference to whatever mutates it.
//!
//! ## Usage Example
//!
//! ```
//! use perm_core::name::{rights, RoleName};
//! use perm_core::{InMemorySchema, Role, Schema};
//!
//! let mut schema = InMemorySchema::new();
//! let admin = RoleName::from("admin");
//!
//! schema.create_role(admin.clone()).unwrap();
//! schema.grant_rights(&admin, &rights(["use", "administrate"])).unwrap();
//!
//! let role = Role::by_name(&schema, "admin").unwrap();
//! assert!(role.can_perform("administrate"));
//! assert!(Role::by_name(&schema, "user").is_none());
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod name;
pub mod schema;

// Re-export key types and traits for convenience
pub use config::{DuplicateRolePolicy, MissingRolePolicy, SchemaConfig};
pub use error::{ConfigError, Error, MigrationError, PlanError, Result, SchemaError};
pub use model::{Right, Role};
pub use name::{MigrationName, RightName, RoleName};
pub use schema::{InMemorySchema, Schema, SchemaSnapshot, SharedSchema};
