use thiserror::Error;

/// Every failure a service can report to its caller.
///
/// Messages are already localized at the point of detection; the HTTP
/// boundary only chooses a status code and wraps the text.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DateParse(String),

    #[error("{0}")]
    HotelNotFound(String),

    #[error("{0}")]
    RoomNotFound(String),

    #[error("{0}")]
    RoomInUse(String),

    #[error("{0}")]
    ClientNotFound(String),

    #[error("{0}")]
    BookingNotFound(String),

    /// Malformed or past range, or an overlap with another booking.
    #[error("{0}")]
    Booking(String),

    #[error("{0}")]
    Review(String),

    #[error("{0}")]
    InsufficientAccess(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether the caller sent something wrong, as opposed to the
    /// service failing to authenticate or to reach its store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Unauthorized(_) | DomainError::Storage(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
