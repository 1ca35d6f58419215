//! Voice session: one background task owns the connection; the handle talks to
//! it through a command channel and a single locked state object.
//!
//! ```text
//! Connecting -> Open -> Ready -> Ended
//!      \          \       \
//!       +----------+-------+--> Closed
//! ```

use super::frames::{
    ControlFrame, FrameSink, FrameStream, InboundFrame, OutboundFrame, ABNORMAL_CLOSURE,
    NORMAL_CLOSURE,
};
use super::handler::VoiceStreamHandler;
use super::transport::VoiceConnector;
use crate::error::ErrorMeta;
use crate::error_code::ErrorKind;
use crate::types::{VoiceSessionSummary, VoiceStreamConfig, VoiceStreamEvent};
use crate::{Error, Result};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

const CLIENT_CLOSE_REASON: &str = "closed by client";

/// Lifecycle phase of a [`VoiceSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Handshake in progress
    Connecting,
    /// Connected, waiting for the server's `ready` event
    Open,
    /// Audio and config updates accepted
    Ready,
    /// Summary received after `end()`
    Ended,
    /// Connection closed, by either side, or never established
    Closed,
}

impl SessionPhase {
    /// `Ended` or `Closed`: no further frames are sent.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Closed)
    }
}

#[derive(Debug, Clone)]
enum Readiness {
    Pending,
    Ready,
    Failed { kind: ErrorKind, message: String },
}

struct SessionState {
    phase: SessionPhase,
    session_id: Option<String>,
    pending_end: Option<oneshot::Sender<Result<VoiceSessionSummary>>>,
    close_requested: bool,
}

enum Command {
    Send(OutboundFrame),
    Close,
}

struct Shared {
    state: Mutex<SessionState>,
    readiness: watch::Sender<Readiness>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fail_readiness(&self, kind: ErrorKind, message: &str) {
        self.readiness.send_if_modified(|r| {
            if matches!(r, Readiness::Pending) {
                *r = Readiness::Failed {
                    kind,
                    message: message.to_string(),
                };
                true
            } else {
                false
            }
        });
    }
}

/// Handle to a live voice stream.
///
/// Dropping the handle closes the connection.
pub struct VoiceSession {
    shared: Arc<Shared>,
    commands: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for VoiceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("VoiceSession")
            .field("phase", &state.phase)
            .field("session_id", &state.session_id)
            .finish()
    }
}

impl VoiceSession {
    /// Start a session and return immediately.
    ///
    /// The handshake runs in the background; failures surface on
    /// [`VoiceSession::ready`] and [`VoiceSession::end`]. Without a tokio
    /// runtime the session is closed immediately and readiness fails with a
    /// configuration error.
    pub fn open<H: VoiceStreamHandler>(
        connector: Arc<dyn VoiceConnector>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        config: Option<VoiceStreamConfig>,
        handler: H,
    ) -> Result<Self> {
        if let Some(config) = &config {
            config.validate()?;
        }
        let (readiness, _) = watch::channel(Readiness::Pending);
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                phase: SessionPhase::Connecting,
                session_id: None,
                pending_end: None,
                close_requested: false,
            }),
            readiness,
        });
        let (commands, command_rx) = mpsc::unbounded_channel();

        let mut task = SessionTask {
            shared: shared.clone(),
            handler,
            commands: command_rx,
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(task.run(connector, endpoint.into(), api_key.into(), config));
            }
            Err(e) => {
                let message = format!("Voice streaming requires a tokio runtime: {}", e);
                warn!(error = %message, "voice session not started");
                shared.fail_readiness(ErrorKind::Configuration, &message);
                task.finish(ABNORMAL_CLOSURE, message);
            }
        }

        Ok(Self { shared, commands })
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> SessionPhase {
        self.shared.lock().phase
    }

    /// Server-assigned id; `None` until the session is ready.
    pub fn session_id(&self) -> Option<String> {
        self.shared.lock().session_id.clone()
    }

    /// Whether the connection is open and not yet ended or closed.
    pub fn is_active(&self) -> bool {
        let phase = self.state();
        phase != SessionPhase::Connecting && !phase.is_terminal()
    }

    /// Wait until the server reports `ready`.
    pub async fn ready(&self) -> Result<()> {
        let mut rx = self.shared.readiness.subscribe();
        let outcome = rx
            .wait_for(|r| !matches!(r, Readiness::Pending))
            .await
            .map(|r| r.clone())
            .map_err(|_| Error::network("voice session task stopped"))?;
        match outcome {
            Readiness::Ready => Ok(()),
            Readiness::Failed { kind, message } => Err(Error::from_kind(
                kind,
                0,
                message,
                ErrorMeta::default(),
                None,
                None,
            )),
            Readiness::Pending => Err(Error::network("voice session task stopped")),
        }
    }

    /// Queue an audio chunk. Only allowed once the session is ready.
    pub fn send_audio(&self, audio: impl Into<Bytes>) -> Result<()> {
        let state = self.shared.lock();
        if state.phase != SessionPhase::Ready {
            return Err(not_connected(state.phase));
        }
        self.enqueue(OutboundFrame::Audio(audio.into()))
    }

    /// Change interval, analysis types or context mid-session.
    pub fn update_config(&self, config: VoiceStreamConfig) -> Result<()> {
        config.validate()?;
        let json = ControlFrame::Config(config).to_json()?;
        let state = self.shared.lock();
        if !matches!(state.phase, SessionPhase::Open | SessionPhase::Ready) {
            return Err(not_connected(state.phase));
        }
        self.enqueue(OutboundFrame::Control(json))
    }

    /// Signal end of audio and wait for the session summary.
    ///
    /// Fails with [`Error::ClosedBeforeSummary`] if the connection closes
    /// first. Only one `end()` may be pending at a time.
    pub async fn end(&self) -> Result<VoiceSessionSummary> {
        self.ready().await?;
        let json = ControlFrame::End.to_json()?;
        let summary = {
            let mut state = self.shared.lock();
            if state.phase != SessionPhase::Ready {
                return Err(not_connected(state.phase));
            }
            if state.pending_end.is_some() {
                return Err(Error::usage("end() is already waiting for a session summary"));
            }
            self.enqueue(OutboundFrame::Control(json))?;
            let (tx, rx) = oneshot::channel();
            state.pending_end = Some(tx);
            rx
        };
        debug!("voice session end requested");
        summary.await.unwrap_or_else(|_| {
            Err(Error::ClosedBeforeSummary {
                code: ABNORMAL_CLOSURE,
                reason: "session task stopped".to_string(),
            })
        })
    }

    /// Close the connection now. Idempotent; does not wait for a summary.
    pub fn close(&self) {
        let pending = {
            let mut state = self.shared.lock();
            if state.close_requested {
                return;
            }
            state.close_requested = true;
            if state.phase != SessionPhase::Ended {
                state.phase = SessionPhase::Closed;
            }
            let _ = self.commands.send(Command::Close);
            state.pending_end.take()
        };
        self.shared
            .fail_readiness(ErrorKind::Usage, "Voice stream was closed");
        if let Some(tx) = pending {
            let _ = tx.send(Err(Error::ClosedBeforeSummary {
                code: NORMAL_CLOSURE,
                reason: CLIENT_CLOSE_REASON.to_string(),
            }));
        }
    }

    fn enqueue(&self, frame: OutboundFrame) -> Result<()> {
        self.commands
            .send(Command::Send(frame))
            .map_err(|_| Error::usage("Voice stream is not connected"))
    }
}

impl Drop for VoiceSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn not_connected(phase: SessionPhase) -> Error {
    Error::usage(format!("Voice stream is not connected (state: {:?})", phase))
}

/// How the connection loop ended.
enum Exit {
    Client,
    Remote { code: u16, reason: String },
}

struct SessionTask<H> {
    shared: Arc<Shared>,
    handler: H,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl<H: VoiceStreamHandler> SessionTask<H> {
    async fn run(
        mut self,
        connector: Arc<dyn VoiceConnector>,
        endpoint: String,
        api_key: String,
        config: Option<VoiceStreamConfig>,
    ) {
        info!(endpoint = %endpoint, "voice session connecting");

        let connected = tokio::select! {
            res = connector.connect(&endpoint, &api_key) => Some(res),
            _ = wait_for_close(&mut self.commands) => None,
        };
        let (sink, stream) = match connected {
            None => {
                self.finish(NORMAL_CLOSURE, CLIENT_CLOSE_REASON.to_string());
                return;
            }
            Some(Err(err)) => {
                warn!(error_kind = err.kind().name(), error = %err, "voice connection failed");
                self.shared.fail_readiness(err.kind(), &err.message());
                self.finish(ABNORMAL_CLOSURE, err.message());
                return;
            }
            Some(Ok(halves)) => halves,
        };

        {
            let mut state = self.shared.lock();
            if state.phase == SessionPhase::Connecting {
                state.phase = SessionPhase::Open;
            }
        }
        debug!("voice session open");

        let exit = self.pump(sink, stream, config).await;
        match exit {
            Exit::Client => self.finish(NORMAL_CLOSURE, CLIENT_CLOSE_REASON.to_string()),
            Exit::Remote { code, reason } => self.finish(code, reason),
        }
    }

    async fn pump(
        &mut self,
        mut sink: FrameSink,
        mut stream: FrameStream,
        config: Option<VoiceStreamConfig>,
    ) -> Exit {
        if let Some(config) = config {
            let frame = match ControlFrame::Config(config).to_json() {
                Ok(json) => OutboundFrame::Control(json),
                Err(err) => return abnormal(err),
            };
            if let Err(err) = sink.send(frame).await {
                return abnormal(err);
            }
        }

        loop {
            tokio::select! {
                biased;

                cmd = self.commands.recv() => match cmd {
                    Some(Command::Send(frame)) => {
                        if let Err(err) = sink.send(frame).await {
                            return abnormal(err);
                        }
                    }
                    Some(Command::Close) | None => {
                        if let Err(err) = sink.send(OutboundFrame::Close).await {
                            debug!(error = %err, "close frame not delivered");
                        }
                        return Exit::Client;
                    }
                },

                frame = stream.next() => match frame {
                    Some(Ok(InboundFrame::Text(text))) => self.dispatch(&text),
                    Some(Ok(InboundFrame::Binary(bytes))) => {
                        debug!(len = bytes.len(), "ignoring binary frame from server");
                    }
                    Some(Ok(InboundFrame::Close { code, reason })) => {
                        return Exit::Remote { code, reason };
                    }
                    Some(Err(err)) => return abnormal(err),
                    None => {
                        return Exit::Remote {
                            code: ABNORMAL_CLOSURE,
                            reason: "connection dropped".to_string(),
                        };
                    }
                },
            }
        }
    }

    fn dispatch(&mut self, text: &str) {
        let event = match serde_json::from_str::<VoiceStreamEvent>(text) {
            Ok(event) => event,
            Err(err) => {
                debug!(error = %err, "ignoring unrecognized voice frame");
                return;
            }
        };

        match event {
            VoiceStreamEvent::Ready(ev) => {
                {
                    let mut state = self.shared.lock();
                    if matches!(state.phase, SessionPhase::Open | SessionPhase::Ready) {
                        state.phase = SessionPhase::Ready;
                        state.session_id = Some(ev.session_id.clone());
                    }
                }
                self.shared.readiness.send_if_modified(|r| {
                    if matches!(r, Readiness::Pending) {
                        *r = Readiness::Ready;
                        true
                    } else {
                        false
                    }
                });
                info!(session_id = %ev.session_id, "voice session ready");
                self.handler.on_ready(&ev);
            }
            VoiceStreamEvent::Transcription(ev) => self.handler.on_transcription(&ev),
            VoiceStreamEvent::Alert(ev) => {
                debug!(category = %ev.category, risk_score = ev.risk_score, "voice alert");
                self.handler.on_alert(&ev);
            }
            VoiceStreamEvent::SessionSummary(summary) => {
                self.handler.on_session_summary(&summary);
                let pending = {
                    let mut state = self.shared.lock();
                    let pending = state.pending_end.take();
                    if pending.is_some() && state.phase == SessionPhase::Ready {
                        state.phase = SessionPhase::Ended;
                    }
                    pending
                };
                if let Some(tx) = pending {
                    info!(session_id = %summary.session_id, "voice session ended");
                    let _ = tx.send(Ok(summary));
                }
            }
            VoiceStreamEvent::ConfigUpdated(ev) => self.handler.on_config_updated(&ev),
            VoiceStreamEvent::Error(ev) => {
                warn!(code = %ev.code, message = %ev.message, "voice server error");
                self.handler.on_error(&ev);
            }
        }
    }

    fn finish(&mut self, code: u16, reason: String) {
        let pending = {
            let mut state = self.shared.lock();
            if state.phase != SessionPhase::Ended {
                state.phase = SessionPhase::Closed;
            }
            state.pending_end.take()
        };
        self.shared
            .fail_readiness(ErrorKind::Network, &format!("Voice connection closed (code: {})", code));
        if let Some(tx) = pending {
            let _ = tx.send(Err(Error::ClosedBeforeSummary {
                code,
                reason: reason.clone(),
            }));
        }
        info!(code, reason = %reason, "voice session closed");
        self.handler.on_close(code, &reason);
    }
}

fn abnormal(err: Error) -> Exit {
    Exit::Remote {
        code: ABNORMAL_CLOSURE,
        reason: err.message(),
    }
}

async fn wait_for_close(commands: &mut mpsc::UnboundedReceiver<Command>) {
    while let Some(cmd) = commands.recv().await {
        if matches!(cmd, Command::Close) {
            return;
        }
    }
}
