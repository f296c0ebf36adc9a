//! User API handlers
//!
//! Handles HTTP requests for creating and listing users.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Request to create a new user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Desired username (validated in the service)
    pub username: Option<String>,
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The username
    pub username: String,
    /// User unique identifier
    pub id: String,
}

/// POST /api/users - Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.create_user(request.username).await?;

    Ok(Json(UserResponse {
        username: user.username,
        id: user.id,
    }))
}

/// GET /api/users - List all users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list_users().await?;

    let responses: Vec<UserResponse> = users
        .into_iter()
        .map(|u| UserResponse {
            username: u.username,
            id: u.id,
        })
        .collect();

    Ok(Json(responses))
}
