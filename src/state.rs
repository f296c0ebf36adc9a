//! Application state
//!
//! Shared handler state: the two services, each constructed over the injected
//! store and clock. Cloned into every request by axum.

use crate::clock::Clock;
use crate::services::{ExerciseService, UserService};
use crate::store::ExerciseStore;
use std::sync::Arc;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// User creation and listing
    pub users: Arc<UserService>,
    /// Exercise recording and log retrieval
    pub exercises: Arc<ExerciseService>,
}

impl AppState {
    /// Build the services over the given store and clock
    pub fn new(store: Arc<dyn ExerciseStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(UserService::new(store.clone())),
            exercises: Arc::new(ExerciseService::new(store, clock)),
        }
    }
}
