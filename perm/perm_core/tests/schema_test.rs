//! Integration tests for perm_core.

use perm_core::name::{rights, RoleName};
use perm_core::{
    DuplicateRolePolicy, InMemorySchema, MissingRolePolicy, Role, Schema, SchemaConfig,
    SchemaError, SchemaSnapshot,
};

#[test]
fn test_lookup_never_constructs_roles() {
    let mut schema = InMemorySchema::new();
    assert!(Role::by_name(&schema, "user").is_none());
    assert_eq!(schema.role_count(), 0);

    let user = RoleName::from("user");
    schema.create_role(user.clone()).unwrap();
    schema.delete_role(&user).unwrap();

    assert!(Role::by_name(&schema, "user").is_none());
    assert_eq!(schema.role_count(), 0);
}

#[test]
fn test_rights_never_outlive_their_role() {
    let mut schema = InMemorySchema::new();
    let admin = RoleName::from("admin");
    schema.create_role(admin.clone()).unwrap();
    schema
        .grant_rights(&admin, &rights(["use", "administrate"]))
        .unwrap();

    schema.delete_role(&admin).unwrap();
    assert_eq!(schema.snapshot(), SchemaSnapshot::new());

    // Granting to the deleted role fails instead of leaving orphan rights
    assert_eq!(
        schema.grant_rights(&admin, &rights(["use"])).unwrap_err(),
        SchemaError::UnknownRole(admin)
    );
    assert!(schema.snapshot().is_empty());
}

#[test]
fn test_config_file_drives_schema_policies() {
    let config = SchemaConfig::from_toml_str(
        r#"
        duplicate_role = "reject"
        "#,
    )
    .unwrap();
    assert_eq!(config.duplicate_role, DuplicateRolePolicy::Reject);
    assert_eq!(config.missing_role_on_delete, MissingRolePolicy::Ignore);

    let mut schema = InMemorySchema::with_config(config);
    let user = RoleName::from("user");
    schema.create_role(user.clone()).unwrap();

    assert!(matches!(
        schema.create_role(user.clone()),
        Err(SchemaError::DuplicateRole(_))
    ));
    assert!(schema.delete_role(&RoleName::from("ghost")).unwrap().is_none());
}

#[test]
fn test_snapshot_roundtrip_through_restore() {
    let snapshot = SchemaSnapshot::new()
        .with_role("user", ["use"])
        .with_role("admin", ["use", "administrate"])
        .with_role("guest", Vec::<&str>::new());

    let schema = snapshot.restore(SchemaConfig::default()).unwrap();

    assert_eq!(schema.role_count(), 3);
    assert!(Role::by_name(&schema, "guest").unwrap().right_count() == 0);
    assert_eq!(SchemaSnapshot::capture(&schema), snapshot);
}
