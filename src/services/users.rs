//! User service
//!
//! Creates users (enforcing username uniqueness) and lists all users.

use crate::error::AppError;
use crate::store::{ExerciseStore, User};
use std::sync::Arc;
use tracing::debug;

/// User creation and listing over an injected store
pub struct UserService {
    store: Arc<dyn ExerciseStore>,
}

impl UserService {
    /// Create a service backed by `store`
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Create a new user
    ///
    /// Fails with `Validation` when the username is missing or blank, and
    /// with `Conflict` when the username is already taken.
    pub async fn create_user(&self, username: Option<String>) -> Result<User, AppError> {
        let username = username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::Validation("Username is required".to_string()))?
            .to_string();

        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let user = User::new(username);
        self.store.insert_user(&user).await?;

        debug!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    /// All users in insertion order
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.store.list_users().await
    }
}
