//! Client SDK for viewing avatar streaming sessions
//!
//! This SDK lets a viewer:
//! - Connect to an avatar streaming session with a backend-issued access token
//! - Receive lifecycle events (stream ready, disconnect, talk start/stop)
//! - Tear the connection down when the viewer goes away

pub mod client;
pub mod errors;
pub mod events;
pub mod models;
pub mod traits;

pub use client::{AvatarClient, LiveKitConnector};
pub use errors::*;
pub use events::*;
pub use models::*;
pub use traits::*;
