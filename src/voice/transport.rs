//! Connectors: how a session obtains its frame sink and stream.
//!
//! [`WsConnector`] speaks WebSocket through `tokio-tungstenite`.
//! [`ChannelConnector`] wires a session to an in-memory peer, which is what the
//! test-suite uses to script server behavior.

use super::frames::{FrameSink, FrameStream, InboundFrame, OutboundFrame};
use crate::error_code::ErrorKind;
use crate::error::ErrorMeta;
use crate::{Error, Result};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{future, SinkExt, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_tungstenite::tungstenite::{
    self,
    client::IntoClientRequest,
    http::{header::AUTHORIZATION, HeaderValue},
    protocol::{frame::coding::CloseCode, CloseFrame},
    Message,
};
use tracing::{debug, info};

/// Opens the transport for a voice session.
#[async_trait]
pub trait VoiceConnector: Send + Sync + 'static {
    async fn connect(&self, url: &str, api_key: &str) -> Result<(FrameSink, FrameStream)>;
}

/// WebSocket connector with bearer authentication.
#[derive(Debug, Clone)]
pub struct WsConnector {
    handshake_timeout: Duration,
}

impl WsConnector {
    pub fn new(handshake_timeout: Duration) -> Self {
        Self { handshake_timeout }
    }
}

impl Default for WsConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl VoiceConnector for WsConnector {
    async fn connect(&self, url: &str, api_key: &str) -> Result<(FrameSink, FrameStream)> {
        let mut request = url
            .into_client_request()
            .map_err(|e| Error::configuration(format!("Invalid voice endpoint {}: {}", url, e)))?;
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::configuration(format!("Invalid API key header: {}", e)))?;
        request.headers_mut().insert(AUTHORIZATION, auth);

        let (ws_stream, response) =
            tokio::time::timeout(self.handshake_timeout, tokio_tungstenite::connect_async(request))
                .await
                .map_err(|_| {
                    Error::timeout(format!(
                        "Voice handshake timed out after {}ms",
                        self.handshake_timeout.as_millis()
                    ))
                })?
                .map_err(map_handshake_error)?;
        info!(status = response.status().as_u16(), "voice websocket connected");

        let (sink, stream) = ws_stream.split();
        let sink = sink
            .sink_map_err(|e| Error::network(e.to_string()))
            .with(|frame: OutboundFrame| future::ready(Ok::<_, Error>(to_message(frame))));
        let stream = stream.filter_map(|msg| future::ready(from_message(msg)));

        Ok((Box::pin(sink), Box::pin(stream)))
    }
}

fn map_handshake_error(err: tungstenite::Error) -> Error {
    if let tungstenite::Error::Http(resp) = &err {
        let status = resp.status().as_u16();
        let kind = ErrorKind::from_http_status(status);
        if kind != ErrorKind::Server {
            return Error::from_kind(
                kind,
                status,
                kind.default_message(),
                ErrorMeta::default(),
                None,
                None,
            );
        }
    }
    Error::network(format!("Voice connection failed: {}", err))
}

fn to_message(frame: OutboundFrame) -> Message {
    match frame {
        OutboundFrame::Audio(bytes) => Message::Binary(bytes),
        OutboundFrame::Control(json) => Message::Text(json.into()),
        OutboundFrame::Close => Message::Close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        })),
    }
}

fn from_message(msg: std::result::Result<Message, tungstenite::Error>) -> Option<Result<InboundFrame>> {
    match msg {
        Ok(Message::Text(text)) => Some(Ok(InboundFrame::Text(text.to_string()))),
        Ok(Message::Binary(bytes)) => Some(Ok(InboundFrame::Binary(bytes))),
        Ok(Message::Close(frame)) => {
            let (code, reason) = frame
                .map(|f| (u16::from(f.code), f.reason.to_string()))
                .unwrap_or((1005, String::new()));
            Some(Ok(InboundFrame::Close { code, reason }))
        }
        Ok(other) => {
            debug!(kind = ?other, "skipping websocket control frame");
            None
        }
        Err(e) => Some(Err(Error::network(e.to_string()))),
    }
}

type Handshake = (String, String);

/// In-memory connector paired with a [`ChannelPeer`].
///
/// Connects once; later attempts fail with a network error.
pub struct ChannelConnector {
    halves: Mutex<Option<(FrameSink, FrameStream)>>,
    failure: Option<(ErrorKind, String)>,
    handshakes: Arc<Mutex<Vec<Handshake>>>,
}

/// Server side of a [`ChannelConnector`].
pub struct ChannelPeer {
    inbound: mpsc::UnboundedSender<Result<InboundFrame>>,
    outbound: mpsc::UnboundedReceiver<OutboundFrame>,
    handshakes: Arc<Mutex<Vec<Handshake>>>,
}

impl ChannelConnector {
    pub fn pair() -> (Self, ChannelPeer) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded();
        let (outbound_tx, outbound_rx) = mpsc::unbounded();
        let handshakes = Arc::new(Mutex::new(Vec::new()));

        let sink: FrameSink =
            Box::pin(outbound_tx.sink_map_err(|e| Error::network(e.to_string())));
        let stream: FrameStream = Box::pin(inbound_rx);

        let connector = Self {
            halves: Mutex::new(Some((sink, stream))),
            failure: None,
            handshakes: handshakes.clone(),
        };
        let peer = ChannelPeer {
            inbound: inbound_tx,
            outbound: outbound_rx,
            handshakes,
        };
        (connector, peer)
    }

    /// A connector whose handshake always fails with `kind`.
    pub fn failing(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            halves: Mutex::new(None),
            failure: Some((kind, message.into())),
            handshakes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl VoiceConnector for ChannelConnector {
    async fn connect(&self, url: &str, api_key: &str) -> Result<(FrameSink, FrameStream)> {
        self.handshakes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((url.to_string(), api_key.to_string()));

        if let Some((kind, message)) = &self.failure {
            return Err(Error::from_kind(
                *kind,
                0,
                message.clone(),
                ErrorMeta::default(),
                None,
                None,
            ));
        }
        self.halves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .ok_or_else(|| Error::network("in-memory connector already used"))
    }
}

impl ChannelPeer {
    /// Deliver a text frame to the session.
    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.inbound.unbounded_send(Ok(InboundFrame::Text(text.into())));
    }

    /// Deliver a JSON event to the session.
    pub fn send_event(&self, event: &serde_json::Value) {
        self.send_text(event.to_string());
    }

    pub fn send_close(&self, code: u16, reason: impl Into<String>) {
        let _ = self.inbound.unbounded_send(Ok(InboundFrame::Close {
            code,
            reason: reason.into(),
        }));
    }

    /// Fail the inbound stream with a transport error.
    pub fn fail(&self, message: impl Into<String>) {
        let _ = self.inbound.unbounded_send(Err(Error::network(message)));
    }

    /// Next frame written by the session; `None` once the session dropped its sink.
    pub async fn next_frame(&mut self) -> Option<OutboundFrame> {
        self.outbound.next().await
    }

    /// A frame already written by the session, without waiting.
    pub fn try_next_frame(&mut self) -> Option<OutboundFrame> {
        self.outbound.try_recv().ok()
    }

    /// `(url, api_key)` of every handshake attempted so far.
    pub fn handshakes(&self) -> Vec<(String, String)> {
        self.handshakes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
