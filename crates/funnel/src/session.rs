//! Session store.
//!
//! Single source of truth for "is anyone signed in" and "what do they own".
//! The entire session is one [`User`] record persisted as JSON under one
//! well-known key; every mutation reads the caller's copy, produces a new
//! immutable record, and writes the whole record back. There is no
//! field-level update primitive.
//!
//! Reads are fail-open: a missing key, an unreadable backend, and a malformed
//! stored payload all surface as "no user", never as an error. Concurrent
//! writers (e.g. two processes over one data directory) are last-write-wins;
//! callers are expected to pass the freshest known record.

use chrono::Utc;

use driftwave_core::{Email, Plan, Project, User};

use crate::storage::{StorageBackend, StorageError};

/// Well-known storage keys owned by the session store.
pub mod keys {
    /// Key for the persisted session user record.
    pub const SESSION_USER: &str = "session_user";
}

/// Store owning the persisted session [`User`].
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
}

impl SessionStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// The currently signed-in user, if any.
    ///
    /// Returns `None` for a missing record, an unreadable backend, or a
    /// malformed payload - all three are non-fatal "signed out" conditions.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.backend.get(keys::SESSION_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable; treating as signed out");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "malformed session record; treating as signed out");
                None
            }
        }
    }

    /// Create a new user and persist it as the sole session user.
    ///
    /// Overwrites any prior session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn create_user(&self, email: Email, name: &str) -> Result<User, StorageError> {
        let user = User::new(email, name);
        self.persist(&user)?;
        Ok(user)
    }

    /// Persist a new record with `plan` attached and `subscribed_at` stamped.
    ///
    /// The caller supplies the full prior record; the store does not re-fetch
    /// internally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn set_plan(&self, user: &User, plan: Plan) -> Result<User, StorageError> {
        let updated = user.clone().with_plan(plan, Utc::now());
        self.persist(&updated)?;
        Ok(updated)
    }

    /// Persist a new record with `project` appended to the project list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn add_project(&self, user: &User, project: Project) -> Result<User, StorageError> {
        let updated = user.clone().with_project(project);
        self.persist(&updated)?;
        Ok(updated)
    }

    /// Remove the persisted session user entirely.
    ///
    /// Subsequent [`Self::current_user`] calls return `None` until a new user
    /// is created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(keys::SESSION_USER)
    }

    fn persist(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(keys::SESSION_USER, &raw)
    }
}
