use std::sync::Arc;
use std::time::Duration;

use avatar_sdk::{AvatarEvent, StreamConnector, StreamCredentials, StreamHandle};
use tracing::{debug, info, warn};

use crate::{
    backend::{client::BackendClient, models::ActiveSession},
    config::StreamConfig,
    lookup::{extract_access_token, find_session, resolve_session_id},
    surface::{ViewState, ViewerSurface},
    utils::errors::{Result, ViewerError},
};

/// Drives one viewing run of an existing streaming session
///
/// Looks the session up at the backend, connects the avatar client with its
/// access token and reacts to the lifecycle events until the stream ends or a
/// failure is reported. Every failure is terminal for the run; there is no
/// retry or reconnection.
pub struct SessionViewer<S: ViewerSurface> {
    backend: BackendClient,
    connector: Arc<dyn StreamConnector>,
    surface: S,
    stream_config: StreamConfig,
    client: Option<Box<dyn StreamHandle>>,
}

impl<S: ViewerSurface> SessionViewer<S> {
    pub fn new(
        backend: BackendClient,
        connector: Arc<dyn StreamConnector>,
        surface: S,
        stream_config: StreamConfig,
    ) -> Self {
        Self {
            backend,
            connector,
            surface,
            stream_config,
            client: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run the viewer for the session named by `session_arg` (a bare id or a
    /// viewer URL carrying one)
    pub async fn run(&mut self, session_arg: Option<&str>) -> Result<()> {
        self.surface.set_state(ViewState::Loading);

        let result = self.view(session_arg).await;
        if let Err(error) = &result {
            self.fail(&error.to_string());
        }

        self.teardown().await;
        result
    }

    async fn view(&mut self, session_arg: Option<&str>) -> Result<()> {
        // Missing id fails before any network call
        let session_id = resolve_session_id(session_arg)?;
        info!("Looking up session {}", session_id);

        let list = self.backend.list_sessions().await?;
        let record = find_session(&list.active_sessions, &session_id)?;
        let credentials = Self::stream_credentials(record)?;

        // Best-effort; the viewer works the same without it
        if let Err(e) = self.surface.request_fullscreen() {
            debug!("Fullscreen request failed: {}", e);
        }

        let (client, events) = self
            .connector
            .connect(credentials)
            .await
            .map_err(ViewerError::Sdk)?;
        self.client = Some(client);

        self.watch_stream(events).await
    }

    /// React to lifecycle events until the stream ends, a failure is reported
    /// or no stream arrives within the connect window
    async fn watch_stream(&mut self, mut events: avatar_sdk::AvatarEventReceiver) -> Result<()> {
        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(self.stream_config.connect_timeout);
        let mut stream_attached = false;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(AvatarEvent::StreamReady { stream }) => {
                        match self.surface.attach_stream(&stream) {
                            Ok(()) => {
                                stream_attached = true;
                                self.surface.set_state(ViewState::Playing);
                            }
                            Err(e) => return Err(ViewerError::Playback(e.to_string())),
                        }
                    }
                    Some(AvatarEvent::StreamDisconnected { reason }) => {
                        return self.handle_disconnect(reason).await;
                    }
                    None => {
                        // Event channel closed without an explicit disconnect
                        return self.handle_disconnect("event stream closed".to_string()).await;
                    }
                    Some(AvatarEvent::AvatarStartTalking) => {
                        debug!("Avatar started talking");
                    }
                    Some(AvatarEvent::AvatarStopTalking) => {
                        debug!("Avatar stopped talking");
                    }
                    Some(AvatarEvent::Error { message }) => {
                        // Surface the message; the stream itself may still arrive
                        self.fail(&message);
                    }
                },
                _ = tokio::time::sleep_until(deadline), if !stream_attached => {
                    return Err(ViewerError::ConnectTimeout {
                        secs: self.stream_config.connect_timeout,
                    });
                }
            }
        }
    }

    async fn handle_disconnect(&mut self, reason: String) -> Result<()> {
        self.surface.detach_stream();
        self.fail(&format!(
            "Stream disconnected: {}. Restart the session to view it again",
            reason
        ));
        // Matches the browser viewer closing itself after a short delay
        tokio::time::sleep(Duration::from_secs(self.stream_config.close_delay)).await;
        Ok(())
    }

    /// All user-facing failures funnel through here
    fn fail(&mut self, message: &str) {
        self.surface.set_state(ViewState::Error);
        self.surface.show_error(message);
    }

    /// Stop all active media tracks and release the client handle
    async fn teardown(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close().await {
                warn!("Failed to close avatar client: {}", e);
            }
        }
    }

    fn stream_credentials(record: &ActiveSession) -> Result<StreamCredentials> {
        let access_token = extract_access_token(record)?;
        let server_url = record
            .url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ViewerError::MissingStreamUrl {
                session_id: record.display_id().to_string(),
            })?;
        Ok(StreamCredentials::new(access_token, server_url))
    }
}
