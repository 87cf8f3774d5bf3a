//! Schema snapshots.
//!
//! A snapshot is a plain-data copy of a schema: every role name with the set
//! of right names it holds. Snapshots compare by value, serialize as JSON and
//! can be restored into a fresh in-memory schema.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{InMemorySchema, Schema};
use crate::config::SchemaConfig;
use crate::error::{Error, Result};
use crate::model::Role;
use crate::name::{RightName, RoleName};

/// A point-in-time copy of the roles and rights held by a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaSnapshot {
    roles: BTreeMap<RoleName, BTreeSet<RightName>>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a sequence of roles.
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let roles = roles
            .into_iter()
            .map(|role| (role.name().clone(), role.right_names().cloned().collect()))
            .collect();

        Self { roles }
    }

    /// Capture the current state of a schema.
    pub fn capture<S>(schema: &S) -> Self
    where
        S: Schema + ?Sized,
    {
        schema.snapshot()
    }

    /// Add a role holding the given rights.
    pub fn with_role<I, R>(mut self, name: impl Into<RoleName>, right_names: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RightName>,
    {
        self.roles.insert(
            name.into(),
            right_names.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Names of every role in the snapshot, in order.
    pub fn role_names(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.keys()
    }

    /// Rights held by a role, if the role is present.
    pub fn rights_of(&self, role_name: &str) -> Option<&BTreeSet<RightName>> {
        self.roles.get(role_name)
    }

    /// Check whether the snapshot contains a role.
    pub fn contains_role(&self, role_name: &str) -> bool {
        self.roles.contains_key(role_name)
    }

    /// Number of roles in the snapshot.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check whether the snapshot contains no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Rebuild an in-memory schema holding exactly this state.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the new schema.
    ///
    /// # Returns
    ///
    /// * `Ok(InMemorySchema)` - The restored schema.
    /// * `Err` - If the schema rejected one of the roles.
    pub fn restore(&self, config: SchemaConfig) -> Result<InMemorySchema> {
        let mut schema = InMemorySchema::with_config(config);

        for (name, right_names) in &self.roles {
            schema.create_role(name.clone())?;
            let right_names: Vec<RightName> = right_names.iter().cloned().collect();
            schema.grant_rights(name, &right_names)?;
        }

        Ok(schema)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Load a snapshot from a JSON file.
    ///
    /// A file that does not exist yields an empty snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Write the snapshot to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::rights;

    fn sample_schema() -> InMemorySchema {
        let mut schema = InMemorySchema::new();
        let user = RoleName::from("user");
        let admin = RoleName::from("admin");
        schema.create_role(user.clone()).unwrap();
        schema.create_role(admin.clone()).unwrap();
        schema.grant_rights(&user, &rights(["use"])).unwrap();
        schema
            .grant_rights(&admin, &rights(["use", "administrate"]))
            .unwrap();
        schema
    }

    #[test]
    fn test_capture() {
        let snapshot = SchemaSnapshot::capture(&sample_schema());

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_role("admin"));
        assert_eq!(snapshot.rights_of("user").unwrap().len(), 1);
        assert!(snapshot.rights_of("ghost").is_none());
    }

    #[test]
    fn test_with_role_matches_capture() {
        let expected = SchemaSnapshot::new()
            .with_role("user", ["use"])
            .with_role("admin", ["administrate", "use"]);

        assert_eq!(sample_schema().snapshot(), expected);
    }

    #[test]
    fn test_restore() {
        let snapshot = sample_schema().snapshot();
        let restored = snapshot.restore(SchemaConfig::strict()).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.config(), &SchemaConfig::strict());
        assert!(restored.lookup("admin").unwrap().can_perform("administrate"));
    }

    #[test]
    fn test_json_format() {
        let snapshot = SchemaSnapshot::new().with_role("user", ["use"]);
        let json = snapshot.to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value, serde_json::json!({ "user": ["use"] }));
        assert_eq!(SchemaSnapshot::from_json_str(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_invalid_json() {
        let result = SchemaSnapshot::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SchemaSnapshot::load(dir.path().join("schema.json")).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let snapshot = sample_schema().snapshot();

        snapshot.save(&path).unwrap();
        assert_eq!(SchemaSnapshot::load(&path).unwrap(), snapshot);
    }
}
