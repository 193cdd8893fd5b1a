use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::{
    backend::models::*,
    config::BackendConfig,
    utils::errors::{Result, ViewerError},
};

/// Maximum text length the backend accepts for a speak task
const MAX_SPEAK_TEXT_LEN: usize = 1000;

/// Client for the session backend
///
/// The backend is an external collaborator: a small session store that brokers
/// streaming sessions with the avatar service and hands out access tokens.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http_client: Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(ViewerError::Backend)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Fetch the list of active sessions
    pub async fn list_sessions(&self) -> Result<SessionList> {
        let url = format!("{}/api/avatar/sessions", self.config.base_url);
        debug!("Fetching active sessions from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if response.status().is_success() {
            let list: SessionList = response.json().await?;
            debug!("Backend returned {} active sessions", list.active_sessions.len());
            Ok(list)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Create and start a new streaming session
    pub async fn start_session(
        &self,
        avatar_id: String,
        quality: String,
    ) -> Result<StartSessionResponse> {
        let url = format!("{}/api/avatar/start", self.config.base_url);
        let request = StartSessionRequest {
            avatar_id,
            quality,
            open_viewer: false,
        };

        info!("Starting new session with avatar {}", request.avatar_id);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if response.status().is_success() {
            let started: StartSessionResponse = response.json().await?;
            info!("Session {} started", started.local_session_id);
            Ok(started)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Send text for the avatar to speak
    pub async fn speak(&self, local_session_id: String, text: String) -> Result<()> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ViewerError::InvalidRequest("Input text is required".to_string()));
        }
        if text.len() > MAX_SPEAK_TEXT_LEN {
            return Err(ViewerError::InvalidRequest(format!(
                "Input text exceeds maximum length of {} characters",
                MAX_SPEAK_TEXT_LEN
            )));
        }

        let url = format!("{}/api/avatar/speak", self.config.base_url);
        let request = SpeakRequest {
            local_session_id,
            text,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if response.status().is_success() {
            info!("Speak task accepted for session {}", request.local_session_id);
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Stop a streaming session
    pub async fn stop_session(&self, local_session_id: String) -> Result<()> {
        let url = format!("{}/api/avatar/stop", self.config.base_url);
        let request = StopRequest { local_session_id };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if response.status().is_success() {
            info!("Session {} stopped", request.local_session_id);
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Distinguish "server unreachable" structurally rather than by message text
    fn classify_send_error(&self, error: reqwest::Error) -> ViewerError {
        if error.is_connect() {
            ViewerError::BackendUnreachable {
                url: self.config.base_url.clone(),
            }
        } else {
            ViewerError::Backend(error)
        }
    }

    /// Decode a non-2xx response into a typed rejection
    async fn rejection(response: reqwest::Response) -> ViewerError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => error_body.error,
            Err(_) if !body.is_empty() => body,
            Err(_) => "Unknown error".to_string(),
        };

        ViewerError::BackendRejected { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn client() -> BackendClient {
        BackendClient::new(BackendConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn speak_rejects_empty_text() {
        let result = client().speak("sid".to_string(), "   ".to_string()).await;
        assert_matches!(result, Err(ViewerError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn speak_rejects_oversized_text() {
        let text = "a".repeat(MAX_SPEAK_TEXT_LEN + 1);
        let result = client().speak("sid".to_string(), text).await;
        assert_matches!(result, Err(ViewerError::InvalidRequest(_)));
    }
}
