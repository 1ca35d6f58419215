//! Safety detection types: bullying, grooming, unsafe content, combined analysis.

use super::{Metadata, TrackingFields};
use serde::{Deserialize, Serialize, Serializer};

/// Severity reported by detectors or requested for guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

/// Overall risk level of an analysis or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a 0..=1 risk score.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Critical
        } else if score >= 0.7 {
            Self::High
        } else if score >= 0.5 {
            Self::Medium
        } else if score >= 0.3 {
            Self::Low
        } else {
            Self::Safe
        }
    }
}

/// Grooming risk reported by the grooming detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroomingRisk {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// Structured analysis context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Context accepted by detection endpoints.
///
/// A bare string names the platform and is sent as `{"platform": "<s>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextInput {
    Platform(String),
    Details(AnalysisContext),
}

impl ContextInput {
    /// Normalized structured form.
    pub fn to_context(&self) -> AnalysisContext {
        match self {
            ContextInput::Platform(platform) => AnalysisContext {
                platform: Some(platform.clone()),
                ..Default::default()
            },
            ContextInput::Details(ctx) => ctx.clone(),
        }
    }
}

impl Serialize for ContextInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_context().serialize(serializer)
    }
}

impl From<&str> for ContextInput {
    fn from(platform: &str) -> Self {
        ContextInput::Platform(platform.to_string())
    }
}

impl From<String> for ContextInput {
    fn from(platform: String) -> Self {
        ContextInput::Platform(platform)
    }
}

impl From<AnalysisContext> for ContextInput {
    fn from(ctx: AnalysisContext) -> Self {
        ContextInput::Details(ctx)
    }
}

/// Single piece of text to run through a detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionInput {
    pub content: String,
    pub context: Option<ContextInput>,
    pub tracking: TrackingFields,
}

pub type DetectBullyingInput = DetectionInput;
pub type DetectUnsafeInput = DetectionInput;

impl DetectionInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<ContextInput>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.tracking.external_id = Some(external_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.tracking.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BullyingResult {
    pub is_bullying: bool,
    pub bullying_type: Vec<String>,
    pub confidence: f64,
    pub severity: Option<Severity>,
    pub rationale: String,
    pub recommended_action: String,
    pub risk_score: f64,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsafeResult {
    #[serde(rename = "unsafe")]
    pub is_unsafe: bool,
    pub categories: Vec<String>,
    pub severity: Option<Severity>,
    pub confidence: f64,
    pub risk_score: f64,
    pub rationale: String,
    pub recommended_action: String,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}

/// Role of a participant in a conversation checked for grooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Adult,
    Child,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroomingMessage {
    pub role: MessageRole,
    pub content: String,
}

impl GroomingMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn adult(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Adult, content)
    }

    pub fn child(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Child, content)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectGroomingInput {
    pub messages: Vec<GroomingMessage>,
    pub child_age: Option<u32>,
    pub tracking: TrackingFields,
}

impl DetectGroomingInput {
    pub fn new(messages: Vec<GroomingMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_child_age(mut self, age: u32) -> Self {
        self.child_age = Some(age);
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.tracking.external_id = Some(external_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroomingResult {
    pub grooming_risk: GroomingRisk,
    pub confidence: f64,
    pub flags: Vec<String>,
    pub rationale: String,
    pub risk_score: f64,
    pub recommended_action: String,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}

/// Detector run by [`crate::TuteliqClient::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Bullying,
    Unsafe,
}

/// Input for the combined quick analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeInput {
    pub content: String,
    pub context: Option<ContextInput>,
    /// Detectors to run; both by default
    pub include: Vec<AnalysisType>,
    pub tracking: TrackingFields,
}

impl AnalyzeInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            context: None,
            include: vec![AnalysisType::Bullying, AnalysisType::Unsafe],
            tracking: TrackingFields::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<ContextInput>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_include(mut self, include: Vec<AnalysisType>) -> Self {
        self.include = include;
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.tracking.external_id = Some(external_id.into());
        self
    }
}

impl From<&str> for AnalyzeInput {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for AnalyzeInput {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Combined result of [`crate::TuteliqClient::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub summary: String,
    pub bullying: Option<BullyingResult>,
    #[serde(rename = "unsafe")]
    pub unsafe_content: Option<UnsafeResult>,
    pub recommended_action: String,
    pub external_id: Option<String>,
    pub metadata: Option<Metadata>,
}
