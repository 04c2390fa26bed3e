use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Data file missing and could not be created, or unreadable.
    StorageUnavailable(String),
    /// Data file present but not a valid user directory.
    StorageCorrupt(String),
    /// Data file write did not complete.
    PersistFailure(String),
    NotFound(String),
    InvalidRequest(String),
    MissingApiKey(String),
    ExternalApi(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StorageUnavailable(_)
            | AppError::StorageCorrupt(_)
            | AppError::PersistFailure(_)
            | AppError::ExternalApi(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            AppError::StorageCorrupt(msg) => write!(f, "Storage corrupt: {}", msg),
            AppError::PersistFailure(msg) => write!(f, "Persist failure: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::MissingApiKey(msg) => write!(f, "API key missing: {}", msg),
            AppError::ExternalApi(msg) => write!(f, "External API error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
