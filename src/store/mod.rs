//! Storage layer
//!
//! Users and exercises live in two SQLite tables behind the `ExerciseStore`
//! trait. Services take the store as an injected dependency, so tests can
//! swap in the in-memory implementation.

pub mod db;
pub mod memory;
pub mod models;

pub use db::SqliteStore;
pub use memory::MemoryStore;
pub use models::{Exercise, LogFilter, User};

use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for users and exercise records
///
/// Each method is a single storage operation; no multi-step transactions are
/// required anywhere in the service.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Persist a new user
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    /// Look up a user by id
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Look up a user by username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// All users in insertion order
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Persist a new exercise record
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError>;

    /// A user's exercises matching `filter`, ascending by date
    async fn find_exercises(
        &self,
        user_id: &str,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, AppError>;
}
