//! Exercise API handlers
//!
//! Handles HTTP requests for logging exercises and retrieving a user's
//! exercise log.

use crate::error::AppError;
use crate::services::exercises::{ExerciseLog, LogQuery, LoggedExercise, NewExercise};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

/// Duration as it arrives on the wire
///
/// The original form-encoded clients send everything as strings, so both a
/// JSON number and a numeric string are accepted; the service does the
/// integer validation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    /// Duration as a JSON number
    Number(serde_json::Number),
    /// Duration as a string
    Text(String),
}

impl DurationValue {
    fn into_raw(self) -> String {
        match self {
            DurationValue::Number(n) => n.to_string(),
            DurationValue::Text(s) => s,
        }
    }
}

/// Request to log an exercise
#[derive(Debug, Deserialize)]
pub struct LogExerciseRequest {
    /// What was done (required, validated in the service)
    pub description: Option<String>,
    /// Duration in minutes (required, validated in the service)
    pub duration: Option<DurationValue>,
    /// Calendar date; defaults to today when absent or empty
    pub date: Option<String>,
}

/// Query parameters for log retrieval
#[derive(Debug, Deserialize)]
pub struct LogParams {
    /// Inclusive lower date bound
    pub from: Option<String>,
    /// Inclusive upper date bound
    pub to: Option<String>,
    /// Maximum number of entries
    pub limit: Option<String>,
}

/// POST /api/users/:id/exercises - Log an exercise for a user
pub async fn log_exercise(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<LogExerciseRequest>,
) -> Result<Json<LoggedExercise>, AppError> {
    let input = NewExercise {
        description: request.description,
        duration: request.duration.map(DurationValue::into_raw),
        date: request.date,
    };

    let logged = state.exercises.log_exercise(&user_id, input).await?;
    Ok(Json(logged))
}

/// GET /api/users/:id/logs - Retrieve a user's exercise log
pub async fn get_log(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<ExerciseLog>, AppError> {
    let query = LogQuery {
        from: params.from,
        to: params.to,
        limit: params.limit,
    };

    let log = state.exercises.get_log(&user_id, query).await?;
    Ok(Json(log))
}
