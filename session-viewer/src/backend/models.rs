use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record from the backend's active-sessions listing
///
/// The backend exposes both its own identifier (`local_session_id`) and the
/// upstream streaming session id (`session_id`); viewers may be handed either.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActiveSession {
    #[serde(default)]
    pub local_session_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Bearer token authorizing the viewer's streaming connection
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token for backend-side control calls, unused by the viewer
    #[serde(default)]
    pub api_token: Option<String>,
    /// Streaming server URL for this session
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ice_servers: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl ActiveSession {
    /// Whether this record is identified by the given id under either alias
    pub fn matches(&self, id: &str) -> bool {
        self.local_session_id.as_deref() == Some(id) || self.session_id.as_deref() == Some(id)
    }

    /// Best identifier for log and error messages
    pub fn display_id(&self) -> &str {
        self.local_session_id
            .as_deref()
            .or(self.session_id.as_deref())
            .unwrap_or("<unknown>")
    }
}

/// Response of `GET /api/avatar/sessions`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionList {
    pub active_sessions: Vec<ActiveSession>,
    #[serde(default)]
    pub count: usize,
}

/// Request body for `POST /api/avatar/start`
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest {
    pub avatar_id: String,
    pub quality: String,
    /// The backend would otherwise open its own browser viewer
    pub open_viewer: bool,
}

/// Response of `POST /api/avatar/start`
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionResponse {
    pub local_session_id: String,
    pub session_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub status: String,
}

/// Request body for `POST /api/avatar/speak`
#[derive(Debug, Clone, Serialize)]
pub struct SpeakRequest {
    pub local_session_id: String,
    pub text: String,
}

/// Request body for `POST /api/avatar/stop`
#[derive(Debug, Clone, Serialize)]
pub struct StopRequest {
    pub local_session_id: String,
}

/// Error body the backend returns on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_either_alias() {
        let session: ActiveSession = serde_json::from_str(
            r#"{"local_session_id":"local-1","session_id":"remote-1","access_token":"tok"}"#,
        )
        .unwrap();
        assert!(session.matches("local-1"));
        assert!(session.matches("remote-1"));
        assert!(!session.matches("other"));
    }

    #[test]
    fn deserializes_listing_with_missing_fields() {
        let list: SessionList = serde_json::from_str(
            r#"{"active_sessions":[{"session_id":"s1"}],"count":1}"#,
        )
        .unwrap();
        assert_eq!(list.active_sessions.len(), 1);
        assert!(list.active_sessions[0].access_token.is_none());
        assert_eq!(list.active_sessions[0].display_id(), "s1");
    }
}
