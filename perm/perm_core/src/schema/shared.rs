//! Shared schema.
//!
//! Migrations assume a single writer. When a schema has to be reachable from
//! several threads, `SharedSchema` serializes every access behind one mutex.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{InMemorySchema, Schema, SchemaSnapshot};

/// A schema shared between threads.
///
/// Cloning a `SharedSchema` yields another handle to the same schema.
pub struct SharedSchema<S = InMemorySchema> {
    inner: Arc<Mutex<S>>,
}

impl<S: Schema> SharedSchema<S> {
    /// Wrap a schema for shared use.
    pub fn new(schema: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(schema)),
        }
    }

    /// Run a closure with exclusive access to the schema.
    ///
    /// The lock is held for the whole closure, so everything done inside it
    /// is observed by other handles as a single step.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut schema = self.inner.lock();
        f(&mut *schema)
    }

    /// Capture the current state of the schema.
    pub fn snapshot(&self) -> SchemaSnapshot {
        self.inner.lock().snapshot()
    }

    /// Take the schema back out, if this is the last handle.
    pub fn try_into_inner(self) -> Result<S, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<S> Clone for SharedSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for SharedSchema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSchema")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl Default for SharedSchema<InMemorySchema> {
    fn default() -> Self {
        Self::new(InMemorySchema::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::{rights, RoleName};
    use std::thread;

    #[test]
    fn test_with_mutates_schema() {
        let shared: SharedSchema = SharedSchema::default();
        shared
            .with(|schema| schema.create_role(RoleName::from("user")).map(|_| ()))
            .unwrap();

        assert!(shared.snapshot().contains_role("user"));
    }

    #[test]
    fn test_handles_share_state() {
        let shared: SharedSchema = SharedSchema::default();
        let other = shared.clone();

        other
            .with(|schema| schema.create_role(RoleName::from("admin")).map(|_| ()))
            .unwrap();

        assert!(shared.snapshot().contains_role("admin"));
    }

    #[test]
    fn test_concurrent_writers() {
        let shared: SharedSchema = SharedSchema::default();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let name = RoleName::from(format!("role{}", i));
                    shared.with(|schema| {
                        schema.create_role(name.clone())?;
                        schema.grant_rights(&name, &rights(["use"]))
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.role_names().all(|name| {
            snapshot.rights_of(name.as_str()).unwrap().len() == 1
        }));
    }

    #[test]
    fn test_try_into_inner() {
        let shared: SharedSchema = SharedSchema::default();
        let other = shared.clone();

        // Still shared
        let shared = shared.try_into_inner().unwrap_err();
        drop(other);

        let schema = shared.try_into_inner().unwrap();
        assert_eq!(schema.role_count(), 0);
    }
}
