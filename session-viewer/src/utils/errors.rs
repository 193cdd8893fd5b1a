use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("No session id provided. Pass a session id or a viewer URL with local_session_id or session_id")]
    MissingSessionId,

    #[error("Session not found: {session_id}. The session may have expired or was never created")]
    SessionNotFound { session_id: String },

    #[error("Session {session_id} has no access token")]
    MissingAccessToken { session_id: String },

    #[error("Session {session_id} has no streaming server URL")]
    MissingStreamUrl { session_id: String },

    #[error("Cannot reach backend at {url}. Is the session server running?")]
    BackendUnreachable { url: String },

    #[error("Backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("Backend returned error {status}: {message}")]
    BackendRejected { status: u16, message: String },

    #[error("Streaming error: {0}")]
    Sdk(#[from] avatar_sdk::AvatarSdkError),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("No media stream arrived within {secs}s. Restart the session and try again")]
    ConnectTimeout { secs: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
