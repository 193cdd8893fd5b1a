use async_trait::async_trait;
use livekit::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    errors::{AvatarSdkError, Result},
    events::{map_data_payload, AvatarEvent, AvatarEventReceiver, AvatarEventSender},
    models::{MediaKind, MediaStream, StreamCredentials},
    traits::{StreamConnector, StreamHandle},
};

/// Viewer-side connection to an avatar streaming session
///
/// Wraps a LiveKit room joined with a backend-issued access token and
/// translates transport events into [`AvatarEvent`]s.
pub struct AvatarClient {
    room: Room,
    forward_task: tokio::task::JoinHandle<()>,
}

impl AvatarClient {
    /// Connect to the streaming session authorized by the credentials
    ///
    /// Returns the client handle together with the lifecycle event stream,
    /// mirroring the shape of `Room::connect` itself.
    pub async fn connect(
        credentials: StreamCredentials,
    ) -> Result<(Self, AvatarEventReceiver)> {
        let ws_url = to_websocket_url(&credentials.server_url)?;
        debug!("Connecting avatar client to {}", ws_url);

        let (room, room_events) =
            Room::connect(&ws_url, &credentials.access_token, RoomOptions::default())
                .await
                .map_err(|e| AvatarSdkError::Connect(e.to_string()))?;

        info!("Avatar client connected to streaming session");

        let (sender, receiver) = mpsc::unbounded_channel();
        let forward_task = tokio::spawn(async move {
            forward_room_events(room_events, sender).await;
        });

        Ok((
            Self {
                room,
                forward_task,
            },
            receiver,
        ))
    }

    /// Stop all active media tracks and release the connection
    pub async fn close(self) -> Result<()> {
        self.forward_task.abort();
        self.room
            .close()
            .await
            .map_err(|e| AvatarSdkError::Engine(e.to_string()))?;
        info!("Avatar client connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for AvatarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarClient").finish_non_exhaustive()
    }
}

/// Translate room events into viewer lifecycle events until the room goes away
async fn forward_room_events(
    mut room_events: mpsc::UnboundedReceiver<RoomEvent>,
    sender: AvatarEventSender,
) {
    while let Some(event) = room_events.recv().await {
        match event {
            RoomEvent::TrackSubscribed {
                track,
                publication: _,
                participant,
            } => {
                let kind = match &track {
                    RemoteTrack::Audio(_) => MediaKind::Audio,
                    RemoteTrack::Video(_) => MediaKind::Video,
                };
                let stream = MediaStream {
                    participant: participant.identity().to_string(),
                    track_sid: track.sid().to_string(),
                    kind,
                };
                info!(
                    "Subscribed to {:?} track {} from {}",
                    stream.kind, stream.track_sid, stream.participant
                );
                if sender.send(AvatarEvent::StreamReady { stream }).is_err() {
                    break;
                }
            }
            RoomEvent::TrackSubscriptionFailed {
                participant, error, ..
            } => {
                let message = format!(
                    "Failed to subscribe to track from {}: {}",
                    participant.identity(),
                    error
                );
                warn!("{}", message);
                if sender.send(AvatarEvent::Error { message }).is_err() {
                    break;
                }
            }
            RoomEvent::DataReceived { payload, .. } => {
                if let Some(event) = map_data_payload(&payload) {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
            RoomEvent::Connected { .. } => {
                debug!("Streaming room connection established");
            }
            RoomEvent::Disconnected { reason } => {
                warn!("Streaming room disconnected: {:?}", reason);
                let _ = sender.send(AvatarEvent::StreamDisconnected {
                    reason: format!("{:?}", reason),
                });
                break;
            }
            _ => {
                // Participant and quality events are not part of the viewer surface
            }
        }
    }
    debug!("Room event forwarding stopped");
}

/// Normalize the backend-provided server URL to WebSocket form
///
/// `Room::connect` requires a ws:// or wss:// URL while backends commonly
/// hand out the HTTP form.
fn to_websocket_url(server_url: &str) -> Result<String> {
    if server_url.starts_with("ws://") || server_url.starts_with("wss://") {
        Ok(server_url.to_string())
    } else if let Some(rest) = server_url.strip_prefix("http://") {
        Ok(format!("ws://{}", rest))
    } else if let Some(rest) = server_url.strip_prefix("https://") {
        Ok(format!("wss://{}", rest))
    } else {
        Err(AvatarSdkError::InvalidUrl(server_url.to_string()))
    }
}

#[async_trait]
impl StreamHandle for AvatarClient {
    async fn close(self: Box<Self>) -> Result<()> {
        (*self).close().await
    }
}

/// Production connector backed by LiveKit
#[derive(Debug, Clone, Default)]
pub struct LiveKitConnector;

#[async_trait]
impl StreamConnector for LiveKitConnector {
    async fn connect(
        &self,
        credentials: StreamCredentials,
    ) -> Result<(Box<dyn StreamHandle>, AvatarEventReceiver)> {
        let (client, events) = AvatarClient::connect(credentials).await?;
        Ok((Box::new(client), events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket_url_normalization() {
        assert_eq!(
            to_websocket_url("http://localhost:7880").unwrap(),
            "ws://localhost:7880"
        );
        assert_eq!(
            to_websocket_url("https://stream.example.com").unwrap(),
            "wss://stream.example.com"
        );
        assert_eq!(
            to_websocket_url("ws://localhost:7880").unwrap(),
            "ws://localhost:7880"
        );
        assert_eq!(
            to_websocket_url("wss://stream.example.com").unwrap(),
            "wss://stream.example.com"
        );
    }

    #[test]
    fn websocket_url_rejects_unknown_schemes() {
        assert!(matches!(
            to_websocket_url("ftp://nope"),
            Err(AvatarSdkError::InvalidUrl(_))
        ));
    }
}
