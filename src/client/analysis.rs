//! Emotion analysis, action plans and incident reports.

use super::core::TuteliqClient;
use super::safety::with_tracking;
use super::validation::{
    validate_content, validate_messages, validate_situation, validate_tracking,
};
use crate::types::{
    ActionPlanResult, AnalyzeEmotionsInput, EmotionsResult, GenerateReportInput,
    GetActionPlanInput, ReportResult,
};
use crate::{Error, Result};
use serde_json::{json, Map, Value};

impl TuteliqClient {
    /// Summarize emotions in a single text or a message history.
    pub async fn analyze_emotions(&self, input: AnalyzeEmotionsInput) -> Result<EmotionsResult> {
        validate_tracking(&input.tracking)?;

        let messages: Vec<Value> = match (&input.content, input.messages.is_empty()) {
            (Some(content), _) => {
                validate_content(content)?;
                vec![json!({"sender": "user", "text": content})]
            }
            (None, false) => {
                validate_messages(&input.messages)?;
                for m in &input.messages {
                    validate_content(&m.content)?;
                }
                input
                    .messages
                    .iter()
                    .map(|m| {
                        let mut msg = json!({"sender": m.sender, "text": m.content});
                        if let Some(ts) = &m.timestamp {
                            msg["timestamp"] = Value::String(ts.clone());
                        }
                        msg
                    })
                    .collect()
            }
            (None, true) => {
                return Err(Error::validation("Either content or messages is required"));
            }
        };

        let mut body = json!({ "messages": messages });
        if let Some(context) = &input.context {
            body["context"] = serde_json::to_value(context)?;
        }
        self.post("/api/v1/analysis/emotions", with_tracking(body, &input.tracking))
            .await
    }

    /// Age-appropriate guidance for a described situation.
    pub async fn get_action_plan(&self, input: GetActionPlanInput) -> Result<ActionPlanResult> {
        validate_situation(&input.situation)?;
        validate_tracking(&input.tracking)?;

        let mut body = Map::new();
        body.insert("situation".into(), Value::String(input.situation.clone()));
        body.insert(
            "role".into(),
            serde_json::to_value(input.audience.unwrap_or_default())?,
        );
        if let Some(age) = input.child_age {
            body.insert("child_age".into(), json!(age));
        }
        if let Some(severity) = input.severity {
            body.insert("severity".into(), serde_json::to_value(severity)?);
        }
        self.post(
            "/api/v1/guidance/action-plan",
            with_tracking(Value::Object(body), &input.tracking),
        )
        .await
    }

    /// Generate a structured incident report from a conversation.
    pub async fn generate_report(&self, input: GenerateReportInput) -> Result<ReportResult> {
        validate_messages(&input.messages)?;
        validate_tracking(&input.tracking)?;

        let messages: Vec<Value> = input
            .messages
            .iter()
            .map(|m| {
                let mut msg = json!({"sender": m.sender, "text": m.content});
                if let Some(ts) = &m.timestamp {
                    msg["timestamp"] = Value::String(ts.clone());
                }
                msg
            })
            .collect();

        let mut meta = match &input.incident {
            Some(incident) => serde_json::to_value(incident)?,
            None => Value::Object(Map::new()),
        };
        if let Some(age) = input.child_age {
            meta["child_age"] = json!(age);
        }

        let mut body = json!({ "messages": messages });
        if meta.as_object().map_or(false, |m| !m.is_empty()) {
            body["meta"] = meta;
        }
        self.post("/api/v1/reports/incident", with_tracking(body, &input.tracking))
            .await
    }
}
