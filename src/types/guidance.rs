//! Action plan guidance types.

use super::{Metadata, Severity, TrackingFields};
use serde::{Deserialize, Serialize};

/// Who the guidance is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Child,
    #[default]
    Parent,
    Educator,
    Platform,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetActionPlanInput {
    pub situation: String,
    pub child_age: Option<u32>,
    /// Defaults to [`Audience::Parent`]
    pub audience: Option<Audience>,
    pub severity: Option<Severity>,
    pub tracking: TrackingFields,
}

impl GetActionPlanInput {
    pub fn new(situation: impl Into<String>) -> Self {
        Self {
            situation: situation.into(),
            ..Default::default()
        }
    }

    pub fn with_child_age(mut self, age: u32) -> Self {
        self.child_age = Some(age);
        self
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPlanResult {
    pub audience: String,
    pub steps: Vec<String>,
    pub tone: String,
    pub reading_level: Option<String>,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}
