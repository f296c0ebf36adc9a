//! Service layer
//!
//! Validation and response shaping between the HTTP handlers and the store.

pub mod exercises;
pub mod users;

pub use exercises::ExerciseService;
pub use users::UserService;
