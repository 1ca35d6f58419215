//! Emotion analysis types.

use super::{ContextInput, Metadata, TrackingFields};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionMessage {
    /// Sender identifier or role
    pub sender: String,
    pub content: String,
    /// ISO-8601 timestamp
    pub timestamp: Option<String>,
}

impl EmotionMessage {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Either a single piece of content or a message history must be supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeEmotionsInput {
    pub content: Option<String>,
    pub messages: Vec<EmotionMessage>,
    pub context: Option<ContextInput>,
    pub tracking: TrackingFields,
}

impl AnalyzeEmotionsInput {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn from_messages(messages: Vec<EmotionMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<ContextInput>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTrend {
    Improving,
    #[default]
    Stable,
    Worsening,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionsResult {
    pub dominant_emotions: Vec<String>,
    /// Score per detected emotion (0..=1)
    pub emotion_scores: HashMap<String, f64>,
    pub trend: EmotionTrend,
    pub summary: String,
    pub recommended_followup: String,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}
