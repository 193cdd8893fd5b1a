use async_trait::async_trait;

use crate::{
    errors::Result,
    events::AvatarEventReceiver,
    models::StreamCredentials,
};

/// Live connection to a streaming session
///
/// Closing stops all active media tracks and releases the underlying
/// transport. The handle is consumed: after teardown nothing can be replayed.
#[async_trait]
pub trait StreamHandle: Send {
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Factory seam for establishing streaming connections
///
/// The production implementation connects over LiveKit; tests substitute a
/// fake that feeds scripted events.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    /// Connect with a backend-issued token, returning a closable handle and
    /// the stream of lifecycle events
    async fn connect(
        &self,
        credentials: StreamCredentials,
    ) -> Result<(Box<dyn StreamHandle>, AvatarEventReceiver)>;
}
