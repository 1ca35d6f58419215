//! # Types Module
//!
//! Request inputs and response shapes for every Tuteliq endpoint, plus the voice
//! streaming protocol.
//!
//! Inputs are plain Rust structs with builder-style helpers; the client shapes
//! them into the wire format (field renames, context normalization) before
//! sending. Responses are deserialized leniently: optional fields default when
//! the API omits them.
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`safety`] | Bullying, grooming, unsafe-content detection and combined analysis |
//! | [`analysis`] | Emotion analysis |
//! | [`guidance`] | Action plans |
//! | [`reports`] | Incident reports |
//! | [`policy`] | Moderation policy configuration |
//! | [`webhooks`] | Webhook management |
//! | [`pricing`] | Public and detailed pricing plans |
//! | [`account`] | GDPR data export and erasure |
//! | [`voice`] | Voice stream configuration and server events |

pub mod account;
pub mod analysis;
pub mod guidance;
pub mod policy;
pub mod pricing;
pub mod reports;
pub mod safety;
pub mod voice;
pub mod webhooks;

pub use account::{AccountDeletionResult, AccountExportResult};
pub use analysis::{AnalyzeEmotionsInput, EmotionMessage, EmotionTrend, EmotionsResult};
pub use guidance::{ActionPlanResult, Audience, GetActionPlanInput};
pub use policy::{PolicyConfig, PolicyConfigResponse};
pub use pricing::{PricingDetailPlan, PricingDetailsResult, PricingPlan, PricingResult};
pub use reports::{GenerateReportInput, IncidentDetails, ReportMessage, ReportResult};
pub use safety::{
    AnalysisContext, AnalysisResult, AnalysisType, AnalyzeInput, BullyingResult, ContextInput,
    DetectBullyingInput, DetectGroomingInput, DetectUnsafeInput, DetectionInput, GroomingMessage,
    GroomingResult, GroomingRisk, MessageRole, RiskLevel, Severity, UnsafeResult,
};
pub use voice::{
    VoiceAlertEvent, VoiceAnalysisType, VoiceConfigUpdatedEvent, VoiceContext, VoiceErrorEvent,
    VoiceReadyEvent, VoiceSessionConfig, VoiceSessionSummary, VoiceStreamConfig,
    VoiceStreamEvent, VoiceTranscriptionEvent, VoiceTranscriptionSegment,
};
pub use webhooks::{
    CreateWebhookInput, CreateWebhookResult, DeleteWebhookResult, RegenerateSecretResult,
    TestWebhookResult, UpdateWebhookInput, UpdateWebhookResult, Webhook, WebhookListResult,
};

use serde::{Deserialize, Serialize};

/// Free-form metadata attached to a request and echoed back in results and webhooks.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Fields for correlating requests with your own systems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingFields {
    /// Your identifier for this request (max 255 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Custom key-value pairs stored with the detection result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl TrackingFields {
    pub fn is_empty(&self) -> bool {
        self.external_id.is_none() && self.metadata.is_none()
    }
}

/// Monthly usage reported by the API on every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Total monthly message limit
    pub limit: u64,
    /// Messages used this month
    pub used: u64,
    /// Messages remaining this month
    pub remaining: u64,
}

/// Per-window request rate limit reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    /// Reset time as sent by the API (epoch seconds)
    pub reset: Option<u64>,
}

/// Metadata captured from the most recent response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// Server correlation id (`x-request-id`)
    pub request_id: Option<String>,
    /// Wall-clock latency of the final attempt
    pub latency_ms: u64,
    pub usage: Option<Usage>,
    pub rate_limit: Option<RateLimitInfo>,
}
