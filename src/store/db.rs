//! SQLite store
//!
//! Handles all database interactions for users and exercise records.

use crate::error::AppError;
use crate::store::models::{Exercise, LogFilter, User};
use crate::store::ExerciseStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection pool for user and exercise storage
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(SqliteStore)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = PathBuf::from(db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
            })?;
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Create the users and exercises tables if they do not exist
    async fn run_migrations(&self) -> Result<(), AppError> {
        let migration_sql = include_str!("../../migrations/001_create_tables.sql");

        // The migration file holds multiple statements; sqlx executes one at a time
        for statement in migration_sql.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl ExerciseStore for SqliteStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
            .bind(&user.id)
            .bind(&user.username)
            .execute(&self.pool)
            .await?;

        debug!("Created user: {}", user.id);
        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO exercises (id, user_id, description, duration, date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&exercise.id)
        .bind(&exercise.user_id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .execute(&self.pool)
        .await?;

        debug!("Recorded exercise {} for user {}", exercise.id, exercise.user_id);
        Ok(())
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, AppError> {
        // Dates are stored as ISO YYYY-MM-DD text, so lexicographic comparison
        // in SQL matches date comparison.
        let mut sql = String::from(
            "SELECT id, user_id, description, duration, date FROM exercises WHERE user_id = ?",
        );
        if filter.from.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if filter.to.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date ASC");
        if filter.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query_as::<_, Exercise>(&sql).bind(user_id);
        if let Some(from) = filter.from {
            query = query.bind(from);
        }
        if let Some(to) = filter.to {
            query = query.bind(to);
        }
        if let Some(limit) = filter.limit {
            query = query.bind(limit);
        }

        let exercises = query.fetch_all(&self.pool).await?;
        Ok(exercises)
    }
}
