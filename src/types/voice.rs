//! Voice streaming configuration and server events.

use super::AnalysisContext;
use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Allowed flush interval range, in seconds.
pub const INTERVAL_SECONDS_RANGE: std::ops::RangeInclusive<u32> = 5..=30;

/// Analysis run on each flushed audio window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceAnalysisType {
    Bullying,
    Unsafe,
    Grooming,
    Emotions,
}

/// Context forwarded to every flush analysis.
pub type VoiceContext = AnalysisContext;

/// Session configuration, sent on connect and with `update_config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoiceStreamConfig {
    /// Flush interval (5-30 s); server default is 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analysis_types: Vec<VoiceAnalysisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<VoiceContext>,
}

impl VoiceStreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval_seconds(mut self, seconds: u32) -> Self {
        self.interval_seconds = Some(seconds);
        self
    }

    pub fn with_analysis_types(mut self, types: impl IntoIterator<Item = VoiceAnalysisType>) -> Self {
        self.analysis_types = types.into_iter().collect();
        self
    }

    pub fn with_context(mut self, context: VoiceContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(seconds) = self.interval_seconds {
            if !INTERVAL_SECONDS_RANGE.contains(&seconds) {
                return Err(Error::validation(format!(
                    "interval_seconds must be between {} and {}, got {}",
                    INTERVAL_SECONDS_RANGE.start(),
                    INTERVAL_SECONDS_RANGE.end(),
                    seconds
                )));
            }
        }
        Ok(())
    }
}

/// Effective configuration echoed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSessionConfig {
    pub interval_seconds: u32,
    pub analysis_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceReadyEvent {
    pub session_id: String,
    pub config: VoiceSessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceTranscriptionSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceTranscriptionEvent {
    pub text: String,
    pub segments: Vec<VoiceTranscriptionSegment>,
    pub flush_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceAlertEvent {
    pub category: String,
    pub severity: String,
    pub risk_score: f64,
    pub details: serde_json::Map<String, serde_json::Value>,
    pub flush_index: u32,
}

/// Final summary delivered after `end()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSessionSummary {
    pub session_id: String,
    pub duration_seconds: f64,
    pub overall_risk: String,
    pub overall_risk_score: f64,
    pub total_flushes: u32,
    pub transcript: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfigUpdatedEvent {
    pub config: VoiceSessionConfig,
}

/// Server-side error reported without closing the connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceErrorEvent {
    pub code: String,
    pub message: String,
}

/// Any event the server can send, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceStreamEvent {
    Ready(VoiceReadyEvent),
    Transcription(VoiceTranscriptionEvent),
    Alert(VoiceAlertEvent),
    SessionSummary(VoiceSessionSummary),
    ConfigUpdated(VoiceConfigUpdatedEvent),
    Error(VoiceErrorEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let ready: VoiceStreamEvent = serde_json::from_str(
            r#"{"type":"ready","session_id":"s1","config":{"interval_seconds":10,"analysis_types":["bullying"]}}"#,
        )
        .unwrap();
        match ready {
            VoiceStreamEvent::Ready(ev) => {
                assert_eq!(ev.session_id, "s1");
                assert_eq!(ev.config.interval_seconds, 10);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let summary: VoiceStreamEvent = serde_json::from_str(
            r#"{"type":"session_summary","session_id":"s1","overall_risk":"low","total_flushes":3}"#,
        )
        .unwrap();
        assert!(matches!(
            summary,
            VoiceStreamEvent::SessionSummary(ref s) if s.total_flushes == 3 && s.transcript.is_empty()
        ));
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        assert!(serde_json::from_str::<VoiceStreamEvent>(r#"{"type":"pong"}"#).is_err());
    }

    #[test]
    fn test_config_interval_bounds() {
        assert!(VoiceStreamConfig::new().with_interval_seconds(5).validate().is_ok());
        assert!(VoiceStreamConfig::new().with_interval_seconds(30).validate().is_ok());
        let err = VoiceStreamConfig::new()
            .with_interval_seconds(4)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), crate::error_code::ErrorKind::Validation);
    }
}
