//! Safety detection endpoints and the combined quick analysis.

use super::core::TuteliqClient;
use super::validation::{validate_content, validate_messages, validate_tracking};
use crate::types::{
    AnalysisResult, AnalysisType, AnalyzeInput, BullyingResult, DetectGroomingInput,
    DetectionInput, GroomingResult, RiskLevel, TrackingFields, UnsafeResult,
};
use crate::Result;
use serde_json::{json, Map, Value};

/// Attach `external_id` / `metadata` when present.
pub(crate) fn with_tracking(mut body: Value, tracking: &TrackingFields) -> Value {
    if let Value::Object(map) = &mut body {
        if let Some(id) = &tracking.external_id {
            map.insert("external_id".into(), Value::String(id.clone()));
        }
        if let Some(metadata) = &tracking.metadata {
            map.insert("metadata".into(), Value::Object(metadata.clone()));
        }
    }
    body
}

fn detection_body(input: &DetectionInput) -> Result<Value> {
    let mut body = Map::new();
    body.insert("text".into(), Value::String(input.content.clone()));
    if let Some(context) = &input.context {
        body.insert("context".into(), serde_json::to_value(context)?);
    }
    Ok(with_tracking(Value::Object(body), &input.tracking))
}

impl TuteliqClient {
    /// Detect bullying in a single piece of content.
    pub async fn detect_bullying(&self, input: DetectionInput) -> Result<BullyingResult> {
        validate_content(&input.content)?;
        validate_tracking(&input.tracking)?;
        self.post("/api/v1/safety/bullying", detection_body(&input)?)
            .await
    }

    /// Detect grooming patterns in a conversation.
    pub async fn detect_grooming(&self, input: DetectGroomingInput) -> Result<GroomingResult> {
        validate_messages(&input.messages)?;
        validate_tracking(&input.tracking)?;

        let messages: Vec<Value> = input
            .messages
            .iter()
            .map(|m| json!({"sender_role": m.role, "text": m.content}))
            .collect();
        let mut body = json!({ "messages": messages });
        if let Some(age) = input.child_age {
            body["context"] = json!({ "child_age": age });
        }
        self.post("/api/v1/safety/grooming", with_tracking(body, &input.tracking))
            .await
    }

    /// Detect unsafe content (self-harm, violence, explicit material, ...).
    pub async fn detect_unsafe(&self, input: DetectionInput) -> Result<UnsafeResult> {
        validate_content(&input.content)?;
        validate_tracking(&input.tracking)?;
        self.post("/api/v1/safety/unsafe", detection_body(&input)?)
            .await
    }

    /// Run bullying and unsafe detection concurrently and combine the results.
    pub async fn analyze(&self, input: impl Into<AnalyzeInput>) -> Result<AnalysisResult> {
        let input = input.into();
        validate_content(&input.content)?;
        validate_tracking(&input.tracking)?;

        let detection = DetectionInput {
            content: input.content.clone(),
            context: input.context.clone(),
            tracking: input.tracking.clone(),
        };
        let run_bullying = input.include.contains(&AnalysisType::Bullying);
        let run_unsafe = input.include.contains(&AnalysisType::Unsafe);

        let bullying = async {
            if run_bullying {
                self.detect_bullying(detection.clone()).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let unsafe_content = async {
            if run_unsafe {
                self.detect_unsafe(detection.clone()).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let (bullying, unsafe_content) = futures::try_join!(bullying, unsafe_content)?;

        Ok(combine(bullying, unsafe_content, input.tracking))
    }
}

/// Merge detector outputs: highest score wins level and action.
pub(crate) fn combine(
    bullying: Option<BullyingResult>,
    unsafe_content: Option<UnsafeResult>,
    tracking: TrackingFields,
) -> AnalysisResult {
    let mut risk_score = 0.0_f64;
    let mut recommended_action = "none".to_string();
    let mut concerns = Vec::new();

    if let Some(b) = &bullying {
        if b.is_bullying {
            let severity = b
                .severity
                .map(|s| format!(" ({:?} severity)", s).to_lowercase())
                .unwrap_or_default();
            concerns.push(format!("Bullying detected{}", severity));
        }
        if b.risk_score > risk_score {
            risk_score = b.risk_score;
            recommended_action = b.recommended_action.clone();
        }
    }
    if let Some(u) = &unsafe_content {
        if u.is_unsafe {
            if u.categories.is_empty() {
                concerns.push("Unsafe content detected".to_string());
            } else {
                concerns.push(format!("Unsafe content detected: {}", u.categories.join(", ")));
            }
        }
        if u.risk_score > risk_score {
            risk_score = u.risk_score;
            recommended_action = u.recommended_action.clone();
        }
    }
    if recommended_action.is_empty() {
        recommended_action = "none".to_string();
    }

    let summary = if concerns.is_empty() {
        "No safety concerns detected.".to_string()
    } else {
        format!("{}.", concerns.join(". "))
    };

    AnalysisResult {
        risk_level: RiskLevel::from_score(risk_score),
        risk_score,
        summary,
        bullying,
        unsafe_content,
        recommended_action,
        external_id: tracking.external_id,
        metadata: tracking.metadata,
    }
}
