//! API module
//!
//! Contains HTTP request handlers for the user and exercise endpoints

pub mod exercises;
pub mod users;
