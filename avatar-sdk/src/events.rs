use serde::Deserialize;
use tokio::sync::mpsc;

use crate::models::MediaStream;

/// Lifecycle events delivered to a session viewer
///
/// The avatar service announces talk boundaries over the room data channel;
/// everything else is derived from transport-level room events.
#[derive(Debug, Clone)]
pub enum AvatarEvent {
    /// A playable remote media stream became available
    StreamReady { stream: MediaStream },
    /// The streaming connection ended
    StreamDisconnected { reason: String },
    /// The avatar started speaking
    AvatarStartTalking,
    /// The avatar stopped speaking
    AvatarStopTalking,
    /// SDK-level failure that does not end the connection by itself
    Error { message: String },
}

pub type AvatarEventSender = mpsc::UnboundedSender<AvatarEvent>;
pub type AvatarEventReceiver = mpsc::UnboundedReceiver<AvatarEvent>;

/// Shape of the data-channel notifications sent by the avatar service
#[derive(Debug, Deserialize)]
struct DataNotification {
    #[serde(rename = "type")]
    kind: String,
}

/// Decode a data-channel payload into a viewer event, if it carries one
///
/// Unknown notification types and non-JSON payloads are ignored rather than
/// surfaced as errors: the data channel also carries traffic the viewer does
/// not care about.
pub fn map_data_payload(payload: &[u8]) -> Option<AvatarEvent> {
    let notification: DataNotification = serde_json::from_slice(payload).ok()?;
    match notification.kind.as_str() {
        "avatar_start_talking" => Some(AvatarEvent::AvatarStartTalking),
        "avatar_stop_talking" => Some(AvatarEvent::AvatarStopTalking),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_talk_notifications() {
        let event = map_data_payload(br#"{"type":"avatar_start_talking","task_id":"t1"}"#);
        assert!(matches!(event, Some(AvatarEvent::AvatarStartTalking)));

        let event = map_data_payload(br#"{"type":"avatar_stop_talking"}"#);
        assert!(matches!(event, Some(AvatarEvent::AvatarStopTalking)));
    }

    #[test]
    fn ignores_unknown_notifications() {
        assert!(map_data_payload(br#"{"type":"chat_message"}"#).is_none());
    }

    #[test]
    fn ignores_non_json_payloads() {
        assert!(map_data_payload(b"ping").is_none());
        assert!(map_data_payload(b"").is_none());
    }
}
