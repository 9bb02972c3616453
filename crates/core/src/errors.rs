use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form: {0}")]
    InvalidForm(FieldErrors),

    #[error("Slot not available: {0}")]
    Conflict(String),

    #[error("Availability unknown: {0}")]
    Unavailable(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
