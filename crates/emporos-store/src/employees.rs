//! # Employee Directory
//!
//! Flat-file persistence for employee records, plus credential matching
//! for login.
//!
//! Matching is the full extent of authentication here: both the username
//! and the stored password must match exactly for a login to succeed.
//! Session handling and authorization policy belong to the layer above.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use emporos_core::types::User;

use crate::error::StoreResult;
use crate::file;

/// JSON-backed employee directory (one file, an array of users).
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    path: PathBuf,
}

impl EmployeeStore {
    /// Creates a store over the given file path. A missing file reads as
    /// an empty directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EmployeeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every employee record.
    pub async fn load_employees(&self) -> StoreResult<Vec<User>> {
        let users: Vec<User> = file::read_json_or_default(&self.path).await?;
        debug!(path = %self.path.display(), count = users.len(), "Loaded employees");
        Ok(users)
    }

    /// Persists the full directory, replacing the previous contents.
    pub async fn save_employees(&self, users: &[User]) -> StoreResult<()> {
        debug!(path = %self.path.display(), count = users.len(), "Saving employees");
        file::write_json(&self.path, &users).await
    }

    /// Returns the user whose username and password both match, or `None`.
    ///
    /// The decision is the conjunction of two independent conditions (user
    /// exists with this name, stored password equals the supplied one);
    /// either one failing fails the login.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        let users = self.load_employees().await?;
        let matched = users
            .into_iter()
            .find(|u| u.username == username && u.password == password);

        if matched.is_none() {
            warn!(username = %username, "Login rejected");
        }
        Ok(matched)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use emporos_core::types::Role;
    use uuid::Uuid;

    fn temp_store() -> EmployeeStore {
        let path = std::env::temp_dir().join(format!("emporos-users-{}.json", Uuid::new_v4()));
        EmployeeStore::new(path)
    }

    fn directory() -> Vec<User> {
        vec![
            User::new("admin", "admin-pw", "Ada Admin", 3_000_000, Role::Admin),
            User::new(
                "carol",
                "carol-pw",
                "Carol Cashier",
                1_500_000,
                Role::Cashier {
                    sector: "Electronics".into(),
                },
            ),
        ]
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let store = temp_store();
        let users = directory();

        store.save_employees(&users).await.unwrap();
        let loaded = store.load_employees().await.unwrap();
        assert_eq!(loaded, users);
    }

    // Credential matching: both conditions must hold, and each failing
    // alone fails the login.

    #[tokio::test]
    async fn test_login_succeeds_when_both_match() {
        let store = temp_store();
        store.save_employees(&directory()).await.unwrap();

        let user = store
            .find_by_credentials("carol", "carol-pw")
            .await
            .unwrap();
        assert_eq!(user.unwrap().username, "carol");
    }

    #[tokio::test]
    async fn test_login_fails_on_wrong_password() {
        let store = temp_store();
        store.save_employees(&directory()).await.unwrap();

        let user = store.find_by_credentials("carol", "wrong").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_login_fails_on_unknown_user() {
        let store = temp_store();
        store.save_employees(&directory()).await.unwrap();

        let user = store
            .find_by_credentials("mallory", "carol-pw")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_login_fails_when_both_wrong() {
        let store = temp_store();
        store.save_employees(&directory()).await.unwrap();

        let user = store.find_by_credentials("mallory", "wrong").await.unwrap();
        assert!(user.is_none());
    }
}
