//! # Voice Module
//!
//! Real-time voice moderation over WebSocket.
//!
//! A [`VoiceSession`] streams raw audio to the server, which transcribes and
//! analyzes it in flush windows and pushes events back: transcriptions, safety
//! alerts and, after [`VoiceSession::end`], a session summary.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`session`] | State machine and the background task owning the connection |
//! | [`handler`] | Callback trait for server events |
//! | [`transport`] | Connector seam (WebSocket or in-memory) |
//! | [`frames`] | Library-independent frame types |

pub mod frames;
pub mod handler;
pub mod session;
pub mod transport;

pub use frames::{InboundFrame, OutboundFrame};
pub use handler::{EventForwarder, VoiceSessionEvent, VoiceStreamHandler};
pub use session::{SessionPhase, VoiceSession};
pub use transport::{ChannelConnector, ChannelPeer, VoiceConnector, WsConnector};

/// Default voice streaming endpoint.
pub const DEFAULT_VOICE_ENDPOINT: &str = "wss://api.tuteliq.ai/voice/stream";
