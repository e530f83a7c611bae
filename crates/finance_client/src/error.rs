//! Errors raised while talking to the backend.
//!
//! [`ClientError`] mirrors the HTTP status families the backend uses; the
//! list controllers and modals turn it into a localized message at the
//! component boundary, so nothing here is shown to the user verbatim.
use api_types::page::PageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Maps a non-success status code and the server message to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Server(message),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<PageError> for ClientError {
    fn from(value: PageError) -> Self {
        Self::Decode(value.to_string())
    }
}
