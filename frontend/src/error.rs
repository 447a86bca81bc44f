use thiserror::Error;

/// Failure of a single round trip through the API facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// What a view shows when its initial load fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The parent campaign (or the entity itself) does not exist.
    NotFound,
    LoadFailed(&'static str),
}

impl ViewError {
    /// Classify a load failure, keeping 404s apart so they can render a not-found message.
    pub fn from_load(err: &ApiError, message: &'static str) -> Self {
        if err.is_not_found() {
            ViewError::NotFound
        } else {
            ViewError::LoadFailed(message)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ViewError::NotFound => "Campaign not found",
            ViewError::LoadFailed(message) => message,
        }
    }
}
