//! Moderation policy configuration.
//!
//! Every field is optional so the same structs serve both reads and partial
//! updates: `set_policy` only sends the fields that are `Some`.

use serde::{Deserialize, Serialize};

/// Flag/block thresholds shared by most detectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_risk_score_to_flag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_risk_score_to_block: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BullyingPolicyConfig {
    #[serde(flatten)]
    pub thresholds: ThresholdConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_moderation: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroomingPolicyConfig {
    #[serde(flatten)]
    pub thresholds: ThresholdConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_adult_review: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfHarmPolicyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_risk_score_to_alert: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provide_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalate_immediately: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatsPolicyConfig {
    #[serde(flatten)]
    pub thresholds: ThresholdConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_authorities: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SexualContentPolicyConfig {
    #[serde(flatten)]
    pub thresholds: ThresholdConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_appropriate: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionMonitoringConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_trends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_on_distress: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReportingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_parents: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullying: Option<BullyingPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grooming: Option<GroomingPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_harm: Option<SelfHarmPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hate_speech: Option<ThresholdConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threats: Option<ThreatsPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexual_content: Option<SexualContentPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violence: Option<ThresholdConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_monitoring: Option<EmotionMonitoringConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_reporting: Option<IncidentReportingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfigResponse {
    pub success: bool,
    pub config: Option<PolicyConfig>,
    pub message: Option<String>,
}
