use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Service of {duration} min starting at {start} ends after the shift closes at {shift_end}")]
    DoesNotFit {
        start: String,
        duration: u32,
        shift_end: String,
    },

    #[error("Time {0} overlaps an existing appointment")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
