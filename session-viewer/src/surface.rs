use avatar_sdk::MediaStream;
use tracing::{info, warn};

use crate::utils::errors::Result;

/// Mutually exclusive viewer states. The surface presents exactly one at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Playing,
    Error,
}

/// Presentation seam for the viewer
///
/// A browser front end would back this with a video element plus loading and
/// error regions; the bundled implementation reports through the log.
pub trait ViewerSurface: Send + Sync {
    /// Switch the visible state, hiding the other two
    fn set_state(&mut self, state: ViewState);

    /// Attach a media stream to the viewing surface and start playback
    fn attach_stream(&mut self, stream: &MediaStream) -> Result<()>;

    /// Clear the viewing surface
    fn detach_stream(&mut self);

    /// Show a user-facing message in the error region
    fn show_error(&mut self, message: &str);

    /// Best-effort fullscreen presentation; failure is logged and ignored
    fn request_fullscreen(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Surface implementation that reports viewer state through tracing
#[derive(Debug, Default)]
pub struct TerminalSurface {
    state: Option<ViewState>,
    attached: Option<MediaStream>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<ViewState> {
        self.state
    }
}

impl ViewerSurface for TerminalSurface {
    fn set_state(&mut self, state: ViewState) {
        if self.state != Some(state) {
            info!("Viewer state: {:?}", state);
            self.state = Some(state);
        }
    }

    fn attach_stream(&mut self, stream: &MediaStream) -> Result<()> {
        info!(
            "Playing {:?} stream {} from {}",
            stream.kind, stream.track_sid, stream.participant
        );
        self.attached = Some(stream.clone());
        Ok(())
    }

    fn detach_stream(&mut self) {
        if self.attached.take().is_some() {
            info!("Stream detached");
        }
    }

    fn show_error(&mut self, message: &str) {
        warn!("{}", message);
    }
}
