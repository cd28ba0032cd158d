//! Error types for dayPlanner

use thiserror::Error;

/// dayPlanner error type
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;
