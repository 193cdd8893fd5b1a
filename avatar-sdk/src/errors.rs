use thiserror::Error;

/// Errors that can occur when using the avatar SDK
#[derive(Error, Debug)]
pub enum AvatarSdkError {
    #[error("Failed to connect to streaming server: {0}")]
    Connect(String),

    #[error("Streaming engine error: {0}")]
    Engine(String),

    #[error("Invalid streaming server URL: {0}")]
    InvalidUrl(String),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for avatar SDK operations
pub type Result<T> = std::result::Result<T, AvatarSdkError>;
