//! In-memory store
//!
//! Vec-backed `ExerciseStore` used for isolated service tests. Behavior
//! matches the SQLite store: insertion order for users, ascending date order
//! for exercise logs.

use crate::error::AppError;
use crate::store::models::{Exercise, LogFilter, User};
use crate::store::ExerciseStore;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory implementation of `ExerciseStore`
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    exercises: Mutex<Vec<Exercise>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        self.exercises.lock().unwrap().push(exercise.clone());
        Ok(())
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, AppError> {
        let exercises = self.exercises.lock().unwrap();
        let mut matching: Vec<Exercise> = exercises
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| filter.from.map_or(true, |from| e.date >= from))
            .filter(|e| filter.to.map_or(true, |to| e.date <= to))
            .cloned()
            .collect();

        matching.sort_by_key(|e| e.date);

        if let Some(limit) = filter.limit {
            matching.truncate(limit as usize);
        }

        Ok(matching)
    }
}
