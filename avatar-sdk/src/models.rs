use serde::{Deserialize, Serialize};

/// Credentials needed to join a streaming session
///
/// The access token is an opaque bearer string minted by the backend when the
/// session was created; the SDK never inspects it.
#[derive(Debug, Clone)]
pub struct StreamCredentials {
    /// Opaque bearer token authorizing the viewer connection
    pub access_token: String,
    /// Streaming server URL handed out by the backend alongside the token
    pub server_url: String,
}

impl StreamCredentials {
    pub fn new(access_token: String, server_url: String) -> Self {
        Self {
            access_token,
            server_url,
        }
    }
}

/// Kind of media carried by a remote stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Descriptor of a remote media stream the viewer can attach to a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    /// Identity of the remote participant publishing the stream
    pub participant: String,
    /// Server-assigned track identifier
    pub track_sid: String,
    pub kind: MediaKind,
}

impl MediaStream {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_stream_kind_check() {
        let stream = MediaStream {
            participant: "avatar-1".to_string(),
            track_sid: "TR_abc".to_string(),
            kind: MediaKind::Video,
        };
        assert!(stream.is_video());

        let audio = MediaStream {
            kind: MediaKind::Audio,
            ..stream
        };
        assert!(!audio.is_video());
    }
}
