//! Incident report types.

use super::{Metadata, RiskLevel, TrackingFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMessage {
    pub sender: String,
    pub content: String,
    pub timestamp: Option<String>,
}

impl ReportMessage {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp: None,
        }
    }
}

/// Optional description of the incident itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncidentDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReportInput {
    pub messages: Vec<ReportMessage>,
    pub child_age: Option<u32>,
    pub incident: Option<IncidentDetails>,
    pub tracking: TrackingFields,
}

impl GenerateReportInput {
    pub fn new(messages: Vec<ReportMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_child_age(mut self, age: u32) -> Self {
        self.child_age = Some(age);
        self
    }

    pub fn with_incident(mut self, incident: IncidentDetails) -> Self {
        self.incident = Some(incident);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub summary: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}
