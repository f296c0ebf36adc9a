//! Stored data models
//!
//! Defines structures for users and their exercise records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,
    /// Unique username
    pub username: String,
}

impl User {
    /// Create a new user with a generated id
    pub fn new(username: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
        }
    }
}

/// A single exercise record belonging to a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    /// Unique identifier for the exercise
    pub id: String,
    /// ID of the user this exercise belongs to
    pub user_id: String,
    /// What was done
    pub description: String,
    /// Duration in minutes
    pub duration: i64,
    /// Calendar date of the exercise (no time component)
    pub date: NaiveDate,
}

impl Exercise {
    /// Create a new exercise record with a generated id
    pub fn new(user_id: String, description: String, duration: i64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            description,
            duration,
            date,
        }
    }
}

/// Filter applied when reading back a user's exercise log
///
/// `from`/`to` are inclusive date bounds; `limit` truncates the result to the
/// first N entries in ascending date order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFilter {
    /// Keep exercises dated on or after this date
    pub from: Option<NaiveDate>,
    /// Keep exercises dated on or before this date
    pub to: Option<NaiveDate>,
    /// Keep at most this many entries
    pub limit: Option<i64>,
}
