//! Callbacks for server events.

use crate::types::{
    VoiceAlertEvent, VoiceConfigUpdatedEvent, VoiceErrorEvent, VoiceReadyEvent,
    VoiceSessionSummary, VoiceStreamEvent, VoiceTranscriptionEvent,
};
use tokio::sync::mpsc;

/// Receives session events in arrival order.
///
/// Every method has a no-op default; implement only what you need. Callbacks
/// run on the session task, so keep them short or hand work off to a channel.
pub trait VoiceStreamHandler: Send + 'static {
    fn on_ready(&mut self, _event: &VoiceReadyEvent) {}
    fn on_transcription(&mut self, _event: &VoiceTranscriptionEvent) {}
    fn on_alert(&mut self, _event: &VoiceAlertEvent) {}
    fn on_session_summary(&mut self, _summary: &VoiceSessionSummary) {}
    fn on_config_updated(&mut self, _event: &VoiceConfigUpdatedEvent) {}
    fn on_error(&mut self, _event: &VoiceErrorEvent) {}
    /// Invoked exactly once, when the connection is gone.
    fn on_close(&mut self, _code: u16, _reason: &str) {}
}

impl VoiceStreamHandler for () {}

/// Event delivered by [`EventForwarder`].
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceSessionEvent {
    Event(VoiceStreamEvent),
    Closed { code: u16, reason: String },
}

/// Handler that forwards every callback into a channel.
#[derive(Debug, Clone)]
pub struct EventForwarder {
    tx: mpsc::UnboundedSender<VoiceSessionEvent>,
}

impl EventForwarder {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<VoiceSessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: VoiceStreamEvent) {
        let _ = self.tx.send(VoiceSessionEvent::Event(event));
    }
}

impl VoiceStreamHandler for EventForwarder {
    fn on_ready(&mut self, event: &VoiceReadyEvent) {
        self.forward(VoiceStreamEvent::Ready(event.clone()));
    }

    fn on_transcription(&mut self, event: &VoiceTranscriptionEvent) {
        self.forward(VoiceStreamEvent::Transcription(event.clone()));
    }

    fn on_alert(&mut self, event: &VoiceAlertEvent) {
        self.forward(VoiceStreamEvent::Alert(event.clone()));
    }

    fn on_session_summary(&mut self, summary: &VoiceSessionSummary) {
        self.forward(VoiceStreamEvent::SessionSummary(summary.clone()));
    }

    fn on_config_updated(&mut self, event: &VoiceConfigUpdatedEvent) {
        self.forward(VoiceStreamEvent::ConfigUpdated(event.clone()));
    }

    fn on_error(&mut self, event: &VoiceErrorEvent) {
        self.forward(VoiceStreamEvent::Error(event.clone()));
    }

    fn on_close(&mut self, code: u16, reason: &str) {
        let _ = self.tx.send(VoiceSessionEvent::Closed {
            code,
            reason: reason.to_string(),
        });
    }
}
