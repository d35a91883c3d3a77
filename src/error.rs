use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LoadgenError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    // Identity errors
    #[error("Identity source error: {0}")]
    IdentitySourceError(String),

    // Selection errors
    #[error("Invalid action weights: {0}")]
    InvalidWeights(String),

    // Request errors
    #[error("Failed to build request: {0}")]
    RequestBuildError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Runner errors
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Generator already stopped")]
    AlreadyStopped,

    // Network errors
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Connection timeout")]
    ConnectionTimeout,

    // System errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LoadgenError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LoadgenError::NetworkError(_) | LoadgenError::ConnectionTimeout
        )
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            LoadgenError::InvalidConfiguration(_)
            | LoadgenError::InvalidBaseUrl(_)
            | LoadgenError::InvalidWeights(_) => "configuration",

            LoadgenError::IdentitySourceError(_) => "identity",

            LoadgenError::RequestBuildError(_) | LoadgenError::SerializationError(_) => "request",

            LoadgenError::UserNotFound(_) | LoadgenError::AlreadyStopped => "runner",

            LoadgenError::NetworkError(_) | LoadgenError::ConnectionTimeout => "network",

            _ => "system",
        }
    }
}

// Result type alias for convenience
pub type LoadgenResult<T> = Result<T, LoadgenError>;
