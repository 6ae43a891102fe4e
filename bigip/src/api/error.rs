use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("API returned error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,
}

impl ApiError {
    /// True when the error means the object does not exist on the device.
    /// Older iControl builds answer some lookups with a non-404 status and a
    /// "not found" message, so the text is checked as well.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::ApiError { status, message } => {
                *status == 404 || message.to_ascii_lowercase().contains("not found")
            }
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ApiError { status, .. } => Some(*status),
            ApiError::RequestError(e) => e.status().map(|s| s.as_u16()),
            ApiError::AuthError => Some(401),
            _ => None,
        }
    }
}
