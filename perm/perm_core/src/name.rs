//! Strongly-typed names for the Perm policy store.
//!
//! Roles, rights and migrations are all identified by plain strings. Each
//! kind of name is a thin wrapper around a `String` with a phantom marker
//! type, so a right name can never be passed where a role name is expected.
//!
//! # Examples
//!
//! ```
//! use perm_core::name::{RightName, RoleName};
//!
//! let role = RoleName::from("admin");
//! let right = RightName::from("administrate");
//!
//! assert_eq!(role.as_str(), "admin");
//! assert_eq!(right.to_string(), "administrate");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

/// A type-safe, string-backed name.
///
/// The phantom type parameter `T` keeps names of different entity kinds
/// apart at compile time. Ordering, equality and hashing only look at the
/// underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name<T> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Name<T> {
    /// Create a new name.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Check whether the name is empty (or only whitespace).
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl<T> fmt::Display for Name<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<&str> for Name<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for Name<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&Name<T>> for Name<T>
where
    T: Clone,
{
    fn from(value: &Name<T>) -> Self {
        value.clone()
    }
}

impl<T> Borrow<str> for Name<T> {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl<T> AsRef<str> for Name<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Marker type for roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleMarker;
/// Name of a role.
pub type RoleName = Name<RoleMarker>;

/// Marker type for rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RightMarker;
/// Name of a right.
pub type RightName = Name<RightMarker>;

/// Marker type for migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationMarker;
/// Name of a migration.
pub type MigrationName = Name<MigrationMarker>;

/// Collect anything that yields string-like items into a list of right names.
///
/// Keeps call sites such as `grant_rights("admin", rights(["use", "administrate"]))`
/// readable.
pub fn rights<I, S>(names: I) -> Vec<RightName>
where
    I: IntoIterator<Item = S>,
    S: Into<RightName>,
{
    names.into_iter().map(Into::into).collect()
}
