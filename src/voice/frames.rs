//! Frames exchanged with the voice endpoint, independent of the WebSocket library.

use crate::types::VoiceStreamConfig;
use crate::{Error, Result};
use bytes::Bytes;
use futures::{Sink, Stream};
use serde::Serialize;
use std::pin::Pin;

/// Close code sent when the client closes the session.
pub const NORMAL_CLOSURE: u16 = 1000;
/// Close code reported when the connection dropped without a close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// Frame written by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Raw audio chunk (binary frame)
    Audio(Bytes),
    /// JSON control message (text frame)
    Control(String),
    /// Normal closure
    Close,
}

/// Frame read by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Binary(Bytes),
    Close { code: u16, reason: String },
}

pub type FrameSink = Pin<Box<dyn Sink<OutboundFrame, Error = Error> + Send>>;
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<InboundFrame>> + Send>>;

/// Client-to-server control message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ControlFrame {
    Config(VoiceStreamConfig),
    End,
}

impl ControlFrame {
    pub(crate) fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
